use std::fmt;

use serde_json::{Map, Value};

use super::day::Day;
use super::range::{AvailabilityRange, ClockTime, RangeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    DayIndex,
    StartTime,
    EndTime,
}

impl Field {
    pub fn aliases(self) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::DayIndex => "dayIndex",
            Field::StartTime => "startTime",
            Field::EndTime => "endTime",
        })
    }
}

// Tried in order. The backend serves camelCase and snake_case rows alike.
pub const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::DayIndex, &["dayIndex", "dayOfWeek", "day_index", "day_of_week"]),
    (Field::StartTime, &["startTime", "start_time"]),
    (Field::EndTime, &["endTime", "end_time"]),
];

fn lookup<'a>(record: &'a Map<String, Value>, field: Field) -> Result<&'a Value, RangeError> {
    field
        .aliases()
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|value| !value.is_null())
        .ok_or(RangeError::MissingField(field))
}

fn parse_day(value: &Value) -> Result<Day, RangeError> {
    let invalid = || RangeError::InvalidDay(value.to_string());
    match value {
        Value::Number(n) => n.as_i64().and_then(Day::from_index).ok_or_else(invalid),
        Value::String(s) => s.parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn parse_time(value: &Value, field: Field) -> Result<ClockTime, RangeError> {
    let invalid = || RangeError::InvalidTime {
        field,
        value: value.to_string(),
    };
    value
        .as_str()
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())
}

pub fn normalize_record(value: &Value) -> Result<AvailabilityRange, RangeError> {
    let record = value.as_object().ok_or(RangeError::NotAnObject)?;

    let day = parse_day(lookup(record, Field::DayIndex)?)?;
    let start = parse_time(lookup(record, Field::StartTime)?, Field::StartTime)?;
    let end = parse_time(lookup(record, Field::EndTime)?, Field::EndTime)?;

    AvailabilityRange::new(day, start, end)
}
