use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotParseError {
    #[error("Unknown day: {0}")]
    UnknownDay(String),
    #[error("Invalid hour slot: {0}")]
    InvalidSlot(String),
    #[error("Unknown band: {0}")]
    UnknownBand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourSlot {
    start: u8,
}

impl HourSlot {
    pub fn new(start_hour: u8) -> Option<Self> {
        (start_hour < 24).then_some(Self { start: start_hour })
    }

    pub fn start_hour(self) -> u8 {
        self.start
    }

    pub fn end_hour(self) -> u8 {
        self.start + 1
    }

    pub fn label(self) -> String {
        format!("{:02}-{:02}", self.start, self.end_hour())
    }

    pub fn all_day() -> impl Iterator<Item = HourSlot> {
        (0..24).map(|start| HourSlot { start })
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.start, self.end_hour())
    }
}

fn parse_boundary(part: &str) -> Option<u8> {
    let hour = match part.split_once(':') {
        Some((hour, minutes)) if minutes == "00" => hour,
        Some(_) => return None,
        None => part,
    };
    hour.parse().ok()
}

impl FromStr for HourSlot {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotParseError::InvalidSlot(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start = parse_boundary(start.trim()).ok_or_else(invalid)?;
        let end = parse_boundary(end.trim()).ok_or_else(invalid)?;

        if end != start.saturating_add(1) {
            return Err(invalid());
        }
        HourSlot::new(start).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    Morning,
    Afternoon,
    Evening,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Morning, Band::Afternoon, Band::Evening];

    fn first_hour(self) -> u8 {
        match self {
            Band::Morning => 8,
            Band::Afternoon => 13,
            Band::Evening => 18,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Band::Morning => "morning",
            Band::Afternoon => "afternoon",
            Band::Evening => "evening",
        }
    }

    pub fn slots(self) -> [HourSlot; 4] {
        let first = self.first_hour();
        std::array::from_fn(|i| HourSlot { start: first + i as u8 })
    }

    pub fn of(slot: HourSlot) -> Option<Band> {
        Self::ALL
            .into_iter()
            .find(|band| (band.first_hour()..band.first_hour() + 4).contains(&slot.start))
    }
}

impl FromStr for Band {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Band::Morning),
            "afternoon" => Ok(Band::Afternoon),
            "evening" => Ok(Band::Evening),
            _ => Err(SlotParseError::UnknownBand(s.to_string())),
        }
    }
}

pub struct SlotCatalog;

impl SlotCatalog {
    pub fn days() -> [super::Day; 7] {
        super::Day::ALL
    }

    pub fn band(band: Band) -> [HourSlot; 4] {
        band.slots()
    }

    pub fn slots() -> impl Iterator<Item = HourSlot> {
        Band::ALL.into_iter().flat_map(Band::slots)
    }

    pub fn contains(slot: HourSlot) -> bool {
        Band::of(slot).is_some()
    }
}
