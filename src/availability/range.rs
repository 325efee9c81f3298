use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::aliases::{self, Field};
use super::day::Day;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Range record is not an object")]
    NotAnObject,
    #[error("Missing field: {0}")]
    MissingField(Field),
    #[error("Invalid day index: {0}")]
    InvalidDay(String),
    #[error("Invalid {field}: {value}")]
    InvalidTime { field: Field, value: String },
    #[error("Range ends before it starts: {start}-{end}")]
    EmptyRange { start: ClockTime, end: ClockTime },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid time: {0}")]
pub struct InvalidClockTime(pub String);

/// Naive wall-clock time. `24:00:00` is representable as an end-of-day marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("time pattern is valid")
    })
}

impl ClockTime {
    pub fn on_the_hour(hour: u8) -> Option<Self> {
        (hour <= 24).then_some(Self { hour, minute: 0, second: 0 })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn floor_hour(self) -> u8 {
        self.hour
    }

    /// First hour not covered when this time closes a range.
    pub fn ceil_hour(self) -> u8 {
        if self.minute > 0 || self.second > 0 {
            self.hour + 1
        } else {
            self.hour
        }
    }

    pub fn is_end_of_day(self) -> bool {
        self.hour == 24
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for ClockTime {
    type Err = InvalidClockTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidClockTime(s.to_string());
        let captures = time_pattern().captures(s.trim()).ok_or_else(invalid)?;
        let part = |i: usize| -> Result<u32, InvalidClockTime> {
            captures
                .get(i)
                .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| invalid()))
        };
        let (hour, minute, second) = (part(1)?, part(2)?, part(3)?);

        let valid = (hour == 24 && minute == 0 && second == 0)
            || NaiveTime::from_hms_opt(hour, minute, second).is_some();
        if !valid {
            return Err(invalid());
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
        })
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
        }
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct AvailabilityRange {
    #[serde(rename = "dayIndex")]
    day: Day,
    #[serde(rename = "startTime")]
    start_time: ClockTime,
    #[serde(rename = "endTime")]
    end_time: ClockTime,
}

impl AvailabilityRange {
    pub fn new(day: Day, start_time: ClockTime, end_time: ClockTime) -> Result<Self, RangeError> {
        if start_time >= end_time || start_time.is_end_of_day() {
            return Err(RangeError::EmptyRange {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            day,
            start_time,
            end_time,
        })
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    pub fn end_time(&self) -> ClockTime {
        self.end_time
    }

    pub fn from_hours(day: Day, start_hour: u8, end_hour: u8) -> Result<Self, RangeError> {
        let start = ClockTime::on_the_hour(start_hour).ok_or_else(|| RangeError::InvalidTime {
            field: Field::StartTime,
            value: start_hour.to_string(),
        })?;
        let end = ClockTime::on_the_hour(end_hour).ok_or_else(|| RangeError::InvalidTime {
            field: Field::EndTime,
            value: end_hour.to_string(),
        })?;
        Self::new(day, start, end)
    }

    pub fn hours(&self) -> Range<u8> {
        self.start_time.floor_hour()..self.end_time.ceil_hour()
    }
}

impl TryFrom<serde_json::Value> for AvailabilityRange {
    type Error = RangeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        aliases::normalize_record(&value)
    }
}
