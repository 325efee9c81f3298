use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::availability::{
    compact, expand_records, project, AvailabilityRange, CalendarProjection, SlotGrid,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A tutoring session needs at least one available hour")]
    EmptySelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPayload {
    pub available_times: Vec<AvailabilityRange>,
}

impl AvailabilityPayload {
    pub fn from_grid(grid: &SlotGrid) -> Result<Self, SessionError> {
        if !grid.has_any_selection() {
            return Err(SessionError::EmptySelection);
        }
        Ok(Self {
            available_times: compact(grid),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionAvailability {
    #[serde(rename = "availableTimes", alias = "available_times", default)]
    pub available_times: Option<Vec<Value>>,
}

impl SessionAvailability {
    pub fn records(&self) -> &[Value] {
        self.available_times.as_deref().unwrap_or_default()
    }

    pub fn grid(&self) -> SlotGrid {
        expand_records(self.records())
    }

    pub fn projection(&self) -> CalendarProjection {
        project(self.available_times.as_deref())
    }
}

pub fn describe(ranges: &[AvailabilityRange]) -> Vec<String> {
    ranges
        .iter()
        .map(|range| {
            format!(
                "{} {:02}:{:02}-{:02}:{:02}",
                range.day().short_label(),
                range.start_time().hour(),
                range.start_time().minute(),
                range.end_time().hour(),
                range.end_time().minute(),
            )
        })
        .collect()
}
