use std::collections::BTreeMap;

use super::day::Day;
use super::slot::{HourSlot, SlotCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    cells: BTreeMap<Day, BTreeMap<HourSlot, bool>>,
}

impl SlotGrid {
    pub fn empty() -> Self {
        let cells = SlotCatalog::days()
            .into_iter()
            .map(|day| (day, SlotCatalog::slots().map(|slot| (slot, false)).collect()))
            .collect();
        Self { cells }
    }

    pub fn toggle(mut self, day: Day, slot: HourSlot) -> Self {
        match self.cells.get_mut(&day).and_then(|slots| slots.get_mut(&slot)) {
            Some(cell) => *cell = !*cell,
            None => tracing::debug!("Ignoring toggle outside catalog: {} {}", day, slot),
        }
        self
    }

    pub fn toggle_labels(self, day_label: &str, slot_label: &str) -> Self {
        match (day_label.parse::<Day>(), slot_label.parse::<HourSlot>()) {
            (Ok(day), Ok(slot)) => self.toggle(day, slot),
            _ => {
                tracing::debug!("Ignoring toggle for unknown labels: {} {}", day_label, slot_label);
                self
            }
        }
    }

    pub fn set(mut self, day: Day, slot: HourSlot, value: bool) -> Self {
        if let Some(cell) = self.cells.get_mut(&day).and_then(|slots| slots.get_mut(&slot)) {
            *cell = value;
        }
        self
    }

    pub fn is_set(&self, day: Day, slot: HourSlot) -> bool {
        self.cells
            .get(&day)
            .and_then(|slots| slots.get(&slot))
            .copied()
            .unwrap_or(false)
    }

    pub fn has_any_selection(&self) -> bool {
        self.cells.values().any(|slots| slots.values().any(|&on| on))
    }

    pub fn selected_count(&self) -> usize {
        self.cells
            .values()
            .map(|slots| slots.values().filter(|&&on| on).count())
            .sum()
    }

    pub fn selected(&self, day: Day) -> impl Iterator<Item = HourSlot> + '_ {
        self.cells
            .get(&day)
            .into_iter()
            .flat_map(|slots| slots.iter().filter(|(_, on)| **on).map(|(slot, _)| *slot))
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::empty()
    }
}
