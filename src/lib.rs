pub mod availability;
pub mod session;
pub mod storage;
pub mod ui;

pub use availability::{AvailabilityRange, CalendarProjection, Day, HourSlot, SlotGrid};
pub use session::{AvailabilityPayload, SessionAvailability};
