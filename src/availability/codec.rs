use serde_json::Value;

use super::aliases::normalize_record;
use super::day::Day;
use super::grid::SlotGrid;
use super::range::{AvailabilityRange, RangeError};
use super::slot::{Band, HourSlot, SlotCatalog};

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub index: usize,
    pub error: RangeError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub grid: SlotGrid,
    pub skipped: Vec<SkippedRecord>,
}

/// Collapses selected hours into the fewest ranges that reproduce them.
///
/// Runs never cross a band gap, because the boundary hours (12, 17, 22) are
/// not selectable. Output is day-major, then band, then start hour.
pub fn compact(grid: &SlotGrid) -> Vec<AvailabilityRange> {
    let mut ranges = Vec::new();

    for day in SlotCatalog::days() {
        for band in Band::ALL {
            let mut run: Option<(u8, u8)> = None;

            for slot in band.slots() {
                if grid.is_set(day, slot) {
                    run = match run {
                        Some((start, _)) => Some((start, slot.end_hour())),
                        None => Some((slot.start_hour(), slot.end_hour())),
                    };
                } else if let Some((start, end)) = run.take() {
                    ranges.extend(close_run(day, start, end));
                }
            }

            if let Some((start, end)) = run {
                ranges.extend(close_run(day, start, end));
            }
        }
    }

    ranges
}

fn close_run(day: Day, start: u8, end: u8) -> Option<AvailabilityRange> {
    match AvailabilityRange::from_hours(day, start, end) {
        Ok(range) => Some(range),
        Err(e) => {
            tracing::warn!("Dropping selected run {} {}-{}: {}", day, start, end, e);
            None
        }
    }
}

/// Marks every catalog hour touched by `ranges`. Hours the catalog does not
/// offer are dropped.
pub fn expand(ranges: &[AvailabilityRange]) -> SlotGrid {
    ranges.iter().fold(SlotGrid::empty(), |grid, range| {
        range
            .hours()
            .filter_map(HourSlot::new)
            .filter(|slot| SlotCatalog::contains(*slot))
            .fold(grid, |grid, slot| grid.set(range.day(), slot, true))
    })
}

pub fn expand_with_report(records: &[Value]) -> Expansion {
    let mut ranges = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match normalize_record(record) {
            Ok(range) => ranges.push(range),
            Err(error) => {
                tracing::warn!("Skipping availability record {}: {} ({})", index, error, record);
                skipped.push(SkippedRecord { index, error });
            }
        }
    }

    Expansion {
        grid: expand(&ranges),
        skipped,
    }
}

pub fn expand_records(records: &[Value]) -> SlotGrid {
    expand_with_report(records).grid
}

pub fn normalize(records: &[Value]) -> Vec<AvailabilityRange> {
    compact(&expand_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn slot(hour: u8) -> HourSlot {
        HourSlot::new(hour).unwrap()
    }

    fn range(day: Day, start: u8, end: u8) -> AvailabilityRange {
        AvailabilityRange::from_hours(day, start, end).unwrap()
    }

    fn grid_with(selection: &[(Day, u8)]) -> SlotGrid {
        selection
            .iter()
            .fold(SlotGrid::empty(), |grid, (day, hour)| grid.toggle(*day, slot(*hour)))
    }

    #[test]
    fn empty_grid_compacts_to_nothing() {
        assert!(compact(&SlotGrid::empty()).is_empty());
    }

    #[test]
    fn consecutive_hours_merge_into_one_range() {
        let grid = grid_with(&[
            (Day::Monday, 8),
            (Day::Monday, 9),
            (Day::Monday, 10),
            (Day::Wednesday, 18),
        ]);

        let wire = serde_json::to_value(compact(&grid)).unwrap();

        assert_eq!(
            wire,
            json!([
                {"dayIndex": 1, "startTime": "08:00:00", "endTime": "11:00:00"},
                {"dayIndex": 3, "startTime": "18:00:00", "endTime": "19:00:00"}
            ])
        );
    }

    #[test]
    fn runs_do_not_merge_across_band_gap() {
        let grid = grid_with(&[(Day::Friday, 11), (Day::Friday, 13)]);

        assert_eq!(
            compact(&grid),
            vec![range(Day::Friday, 11, 12), range(Day::Friday, 13, 14)]
        );
    }

    #[test]
    fn gap_inside_band_splits_run() {
        let grid = grid_with(&[(Day::Sunday, 18), (Day::Sunday, 20), (Day::Sunday, 21)]);

        assert_eq!(
            compact(&grid),
            vec![range(Day::Sunday, 18, 19), range(Day::Sunday, 20, 22)]
        );
    }

    #[test]
    fn output_is_ordered_day_then_band() {
        let grid = grid_with(&[(Day::Saturday, 8), (Day::Monday, 19), (Day::Monday, 9)]);

        assert_eq!(
            compact(&grid),
            vec![
                range(Day::Monday, 9, 10),
                range(Day::Monday, 19, 20),
                range(Day::Saturday, 8, 9),
            ]
        );
    }

    #[test]
    fn full_day_selection_yields_one_range_per_band() {
        let grid = SlotCatalog::slots().fold(SlotGrid::empty(), |g, s| g.toggle(Day::Tuesday, s));

        assert_eq!(
            compact(&grid),
            vec![
                range(Day::Tuesday, 8, 12),
                range(Day::Tuesday, 13, 17),
                range(Day::Tuesday, 18, 22),
            ]
        );
    }

    #[test]
    fn expand_accepts_both_field_namings() {
        let camel = expand_records(&[json!({"dayOfWeek": 1, "startTime": "08:00:00", "endTime": "10:00:00"})]);
        let snake = expand_records(&[json!({"day_of_week": 1, "start_time": "08:00", "end_time": "10:00"})]);

        assert_eq!(camel, snake);
        assert_eq!(camel, grid_with(&[(Day::Monday, 8), (Day::Monday, 9)]));
    }

    #[test]
    fn partial_end_hour_rounds_up() {
        let grid = expand_records(&[json!({"dayIndex": 2, "startTime": "14:00:00", "endTime": "15:30:00"})]);

        let hours: Vec<u8> = grid.selected(Day::Tuesday).map(HourSlot::start_hour).collect();
        assert_eq!(hours, vec![14, 15]);
    }

    #[test]
    fn out_of_catalog_hours_are_dropped() {
        let grid = expand(&[range(Day::Thursday, 6, 10), range(Day::Thursday, 12, 13)]);

        let hours: Vec<u8> = grid.selected(Day::Thursday).map(HourSlot::start_hour).collect();
        assert_eq!(hours, vec![8, 9]);
    }

    #[test]
    fn malformed_records_are_skipped_without_aborting() {
        let records = vec![
            json!({"dayOfWeek": 9, "startTime": "08:00", "endTime": "09:00"}),
            json!({"dayOfWeek": 1, "startTime": "8 o'clock", "endTime": "09:00"}),
            json!({"dayOfWeek": 1}),
            json!("not a record"),
            json!({"dayOfWeek": 1, "startTime": "10:00", "endTime": "09:00"}),
            json!({"dayOfWeek": 4, "startTime": "19:00", "endTime": "20:00"}),
        ];

        let expansion = expand_with_report(&records);

        assert_eq!(expansion.grid, grid_with(&[(Day::Thursday, 19)]));
        let skipped: Vec<usize> = expansion.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn close_run_builds_whole_hour_range() {
        assert_eq!(close_run(Day::Monday, 8, 11), Some(range(Day::Monday, 8, 11)));
    }

    #[test]
    fn close_run_rejects_empty_run_instead_of_panicking() {
        assert_eq!(close_run(Day::Monday, 10, 10), None);
        assert_eq!(close_run(Day::Monday, 23, 25), None);
    }

    #[test]
    fn overlapping_ranges_union() {
        let grid = expand(&[range(Day::Monday, 8, 10), range(Day::Monday, 9, 11)]);
        assert_eq!(compact(&grid), vec![range(Day::Monday, 8, 11)]);
    }

    #[test]
    fn normalize_drops_precision_and_stays_stable() {
        let records = vec![
            json!({"day_of_week": 0, "start_time": "07:00", "end_time": "09:15"}),
            json!({"dayOfWeek": 0, "startTime": "10:00", "endTime": "11:00"}),
        ];

        let once = normalize(&records);
        assert_eq!(once, vec![range(Day::Sunday, 8, 11)]);

        let wire: Vec<Value> = once.iter().map(|r| serde_json::to_value(r).unwrap()).collect();
        assert_eq!(normalize(&wire), once);
    }

    fn arb_grid() -> impl Strategy<Value = SlotGrid> {
        let cells: Vec<(Day, HourSlot)> = SlotCatalog::days()
            .into_iter()
            .flat_map(|day| SlotCatalog::slots().map(move |slot| (day, slot)))
            .collect();
        prop::collection::vec(any::<bool>(), cells.len()).prop_map(move |flags| {
            cells
                .iter()
                .zip(flags)
                .filter(|(_, on)| *on)
                .fold(SlotGrid::empty(), |grid, ((day, slot), _)| grid.toggle(*day, *slot))
        })
    }

    fn arb_day_value() -> impl Strategy<Value = Value> {
        (0i64..9, 0u8..4).prop_map(|(index, style)| match (style, Day::from_index(index)) {
            (0, _) => json!(index),
            (1, _) => json!(index.to_string()),
            (2, Some(day)) => json!(day.short_label()),
            (_, Some(day)) => json!(day.long_label().to_lowercase()),
            (_, None) => json!("someday"),
        })
    }

    fn arb_record() -> impl Strategy<Value = Value> {
        (
            arb_day_value(),
            (0u32..24, 0u32..60, 0u32..60),
            (1u32..6, 0u32..60, 0u32..60),
            any::<[bool; 3]>(),
        )
            .prop_map(|(day, (start, start_minute, start_second), (len, end_minute, end_second), snake)| {
                let end = (start + len).min(24);
                let (end_minute, end_second) = if end == 24 { (0, 0) } else { (end_minute, end_second) };
                let start_time = format!("{:02}:{:02}:{:02}", start, start_minute, start_second);
                let end_time = format!("{:02}:{:02}:{:02}", end, end_minute, end_second);

                let key = |i: usize, camel: &str, snake_name: &str| {
                    if snake[i] { snake_name.to_string() } else { camel.to_string() }
                };
                let mut record = serde_json::Map::new();
                record.insert(key(0, "dayOfWeek", "day_of_week"), day);
                record.insert(key(1, "startTime", "start_time"), json!(start_time));
                record.insert(key(2, "endTime", "end_time"), json!(end_time));
                Value::Object(record)
            })
    }

    proptest! {
        #[test]
        fn expand_inverts_compact(grid in arb_grid()) {
            prop_assert_eq!(expand(&compact(&grid)), grid);
        }

        #[test]
        fn compact_expand_is_idempotent(records in prop::collection::vec(arb_record(), 0..12)) {
            let first = normalize(&records);
            let second = compact(&expand(&first));
            prop_assert_eq!(second, first);
        }

        #[test]
        fn compacted_ranges_are_minimal(grid in arb_grid()) {
            let ranges = compact(&grid);
            for pair in ranges.windows(2) {
                let adjacent = pair[0].day() == pair[1].day()
                    && pair[0].end_time() == pair[1].start_time();
                prop_assert!(!adjacent, "adjacent ranges left unmerged: {:?}", pair);
            }
        }
    }
}
