use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::slot::SlotParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Day::Sunday => "SUN",
            Day::Monday => "MON",
            Day::Tuesday => "TUE",
            Day::Wednesday => "WED",
            Day::Thursday => "THU",
            Day::Friday => "FRI",
            Day::Saturday => "SAT",
        }
    }

    pub fn long_label(self) -> &'static str {
        match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }

    pub fn week_starting(first: Day) -> [Day; 7] {
        let offset = first.index() as usize;
        std::array::from_fn(|i| Self::ALL[(offset + i) % 7])
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Sunday => Weekday::Sun,
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

impl FromStr for Day {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<i64>() {
            return Self::from_index(index).ok_or_else(|| SlotParseError::UnknownDay(s.to_string()));
        }
        trimmed
            .parse::<Weekday>()
            .map(Day::from)
            .map_err(|_| SlotParseError::UnknownDay(s.to_string()))
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = i64::deserialize(deserializer)?;
        Day::from_index(index)
            .ok_or_else(|| serde::de::Error::custom(format!("day index out of range: {}", index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_index_runs_sunday_to_saturday() {
        assert_eq!(Day::Sunday.index(), 0);
        assert_eq!(Day::Monday.index(), 1);
        assert_eq!(Day::Saturday.index(), 6);
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(Day::from_index(3), Some(Day::Wednesday));
        assert_eq!(Day::from_index(7), None);
        assert_eq!(Day::from_index(-1), None);
    }

    #[test]
    fn parses_labels_names_and_indices() {
        assert_eq!("MON".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("thursday".parse::<Day>().unwrap(), Day::Thursday);
        assert_eq!("6".parse::<Day>().unwrap(), Day::Saturday);
        assert!("9".parse::<Day>().is_err());
        assert!("someday".parse::<Day>().is_err());
    }

    #[test]
    fn labels_round_trip_through_chrono_weekday() {
        for day in Day::ALL {
            let long: Weekday = day.long_label().parse().unwrap();
            let short: Weekday = day.short_label().parse().unwrap();
            assert_eq!(Day::from(long), day);
            assert_eq!(Day::from(short), day);
        }
    }

    #[test]
    fn week_starting_monday_ends_on_sunday() {
        let week = Day::week_starting(Day::Monday);
        assert_eq!(week[0], Day::Monday);
        assert_eq!(week[6], Day::Sunday);
        assert_eq!(Day::Sunday.index(), 0);
    }

    #[test]
    fn converts_to_and_from_chrono_weekday() {
        assert_eq!(Day::from(Weekday::Fri), Day::Friday);
        assert_eq!(Weekday::from(Day::Sunday), Weekday::Sun);
    }

    #[test]
    fn serializes_as_storage_index() {
        assert_eq!(serde_json::to_string(&Day::Tuesday).unwrap(), "2");
        let day: Day = serde_json::from_str("5").unwrap();
        assert_eq!(day, Day::Friday);
    }
}
