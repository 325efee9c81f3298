use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::aliases::normalize_record;
use super::day::Day;
use super::range::AvailabilityRange;
use super::slot::HourSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarProjection {
    days: BTreeMap<Day, BTreeSet<HourSlot>>,
}

impl CalendarProjection {
    pub fn empty() -> Self {
        Self {
            days: Day::ALL.into_iter().map(|day| (day, BTreeSet::new())).collect(),
        }
    }

    pub fn occupied(&self, day: Day) -> impl Iterator<Item = HourSlot> + '_ {
        self.days.get(&day).into_iter().flatten().copied()
    }

    pub fn is_occupied(&self, day: Day, slot: HourSlot) -> bool {
        self.days.get(&day).is_some_and(|slots| slots.contains(&slot))
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeSet::is_empty)
    }

    pub fn hour_bounds(&self) -> Option<(u8, u8)> {
        let first = self.days.values().filter_map(|s| s.first()).min()?;
        let last = self.days.values().filter_map(|s| s.last()).max()?;
        Some((first.start_hour(), last.end_hour()))
    }

    fn insert_range(&mut self, range: &AvailabilityRange) {
        let slots = self.days.entry(range.day()).or_default();
        slots.extend(range.hours().filter_map(HourSlot::new));
    }
}

impl Default for CalendarProjection {
    fn default() -> Self {
        Self::empty()
    }
}

pub fn project_ranges(ranges: &[AvailabilityRange]) -> CalendarProjection {
    let mut projection = CalendarProjection::empty();
    for range in ranges {
        projection.insert_range(range);
    }
    projection
}

pub fn project(records: Option<&[Value]>) -> CalendarProjection {
    let mut projection = CalendarProjection::empty();

    for (index, record) in records.unwrap_or_default().iter().enumerate() {
        match normalize_record(record) {
            Ok(range) => projection.insert_range(&range),
            Err(e) => tracing::warn!("Skipping availability record {} in projection: {}", index, e),
        }
    }

    projection
}
