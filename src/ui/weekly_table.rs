use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Row, Table, Widget};

use crate::availability::{CalendarProjection, Day, HourSlot};
use crate::storage::config::{ConfigError, DayLabels, DisplayConfig, HourAxis};

const HOUR_COLUMN_WIDTH: u16 = 5;
const OCCUPIED: &str = "X";
const FREE: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub first_day: Day,
    pub day_labels: DayLabels,
    pub hour_axis: HourAxis,
}

impl TableOptions {
    pub fn from_config(display: &DisplayConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            first_day: display.first_day()?,
            day_labels: display.day_labels,
            hour_axis: display.hour_axis,
        })
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            first_day: Day::Sunday,
            day_labels: DayLabels::Short,
            hour_axis: HourAxis::Full,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTable {
    pub columns: Vec<Day>,
    pub rows: Vec<HourRow>,
    pub day_labels: DayLabels,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub slot: HourSlot,
    pub cells: Vec<bool>,
}

pub fn calculate_layout(projection: &CalendarProjection, options: &TableOptions) -> WeeklyTable {
    let columns = Day::week_starting(options.first_day).to_vec();

    let hours = match options.hour_axis {
        HourAxis::Full => 0..24,
        HourAxis::Occupied => projection
            .hour_bounds()
            .map_or(0..0, |(first, last)| first..last),
    };

    let rows = hours
        .filter_map(HourSlot::new)
        .map(|slot| HourRow {
            slot,
            cells: columns
                .iter()
                .map(|day| projection.is_occupied(*day, slot))
                .collect(),
        })
        .collect();

    WeeklyTable {
        columns,
        rows,
        day_labels: options.day_labels,
    }
}

fn day_label(day: Day, labels: DayLabels) -> &'static str {
    match labels {
        DayLabels::Short => day.short_label(),
        DayLabels::Long => day.long_label(),
    }
}

impl WeeklyTable {
    fn column_width(&self) -> u16 {
        self.columns
            .iter()
            .map(|day| day_label(*day, self.day_labels).len() as u16)
            .max()
            .unwrap_or(3)
    }

    pub fn render_lines(&self) -> Vec<String> {
        if self.rows.is_empty() {
            return vec!["No availability".to_string()];
        }

        let column_width = self.column_width();
        let header = Row::new(
            std::iter::once(String::new())
                .chain(self.columns.iter().map(|d| day_label(*d, self.day_labels).to_string())),
        );
        let rows = self.rows.iter().map(|row| {
            Row::new(std::iter::once(row.slot.label()).chain(
                row.cells
                    .iter()
                    .map(|on| (if *on { OCCUPIED } else { FREE }).to_string()),
            ))
        });
        let widths = std::iter::once(Constraint::Length(HOUR_COLUMN_WIDTH))
            .chain(self.columns.iter().map(|_| Constraint::Length(column_width)));

        let width = HOUR_COLUMN_WIDTH + self.columns.len() as u16 * (column_width + 1);
        let height = self.rows.len() as u16 + 1;
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .render(area, &mut buffer);

        (0..height)
            .map(|y| {
                let line: String = (0..width).map(|x| buffer.get(x, y).symbol()).collect();
                line.trim_end().to_string()
            })
            .collect()
    }

    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }
}
