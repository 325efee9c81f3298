pub mod aliases;
pub mod codec;
pub mod day;
pub mod grid;
pub mod projection;
pub mod range;
pub mod slot;

pub use aliases::{Field, FIELD_ALIASES};
pub use codec::{compact, expand, expand_records, expand_with_report, normalize, Expansion, SkippedRecord};
pub use day::Day;
pub use grid::SlotGrid;
pub use projection::{project, project_ranges, CalendarProjection};
pub use range::{AvailabilityRange, ClockTime, InvalidClockTime, RangeError};
pub use slot::{Band, HourSlot, SlotCatalog, SlotParseError};
