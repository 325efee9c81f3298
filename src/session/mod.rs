pub mod payload;

pub use payload::{describe, AvailabilityPayload, SessionAvailability, SessionError};
