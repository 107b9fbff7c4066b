//! Validated civil dates and clock times.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{calendar_to_jdn, days_in_month, jd_to_local_jdn, jdn_to_calendar};

/// A proleptic Gregorian calendar date that is known to exist.
///
/// Field order gives chronological ordering for the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CivilDate {
    /// Build a date, rejecting anything that is not on the calendar
    /// (April 31, February 29 in a common year, month 13, day 0, ...).
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Date of a Julian Day Number.
    pub fn from_jdn(jdn: i64) -> Self {
        let (year, month, day) = jdn_to_calendar(jdn);
        Self { year, month, day }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    /// Julian Day Number of this date.
    pub fn jdn(self) -> i64 {
        calendar_to_jdn(self.year, self.month, self.day)
    }

    /// The date `days` days later (or earlier, for negative `days`).
    pub fn add_days(self, days: i64) -> Self {
        Self::from_jdn(self.jdn() + days)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: CivilDate) -> i64 {
        other.jdn() - self.jdn()
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got '{s}'")));
        }
        let year = parse_field::<i32>(parts[0], s)?;
        let month = parse_field::<u32>(parts[1], s)?;
        let day = parse_field::<u32>(parts[2], s)?;
        Self::new(year, month, day)
    }
}

/// Wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 {
            return Err(TimeError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u32 {
        self.hour
    }

    pub fn minute(self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since 00:00 (0..1440).
    pub fn minutes_since_midnight(self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Parse `HH:MM`, or a bare `HH` meaning minute 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((h, m)) => Self::new(parse_field(h, s)?, parse_field(m, s)?),
            None => Self::new(parse_field(s, s)?, 0),
        }
    }
}

/// A birth date with an optional time of day.
///
/// `time == None` means the hour is unknown; the hour pillar is then omitted
/// downstream rather than treated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthMoment {
    pub date: CivilDate,
    pub time: Option<ClockTime>,
}

impl BirthMoment {
    pub fn new(date: CivilDate, time: Option<ClockTime>) -> Self {
        Self { date, time }
    }

    /// Build from raw parts. A missing `hour` makes the time unknown and
    /// `minute` is ignored; a present hour with a missing minute means `:00`.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: Option<u32>,
        minute: Option<u32>,
    ) -> Result<Self, TimeError> {
        let date = CivilDate::new(year, month, day)?;
        let time = match hour {
            Some(h) => Some(ClockTime::new(h, minute.unwrap_or(0))?),
            None => None,
        };
        Ok(Self { date, time })
    }

    pub fn hour(&self) -> Option<u32> {
        self.time.map(ClockTime::hour)
    }
}

impl Display for BirthMoment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.time {
            Some(t) => write!(f, "{} {t}", self.date),
            None => write!(f, "{} (time unknown)", self.date),
        }
    }
}

/// Zone-local civil date of the continuous Julian Date `jd`.
pub fn jd_to_civil_date(jd: f64, utc_offset_minutes: i32) -> CivilDate {
    CivilDate::from_jdn(jd_to_local_jdn(jd, utc_offset_minutes))
}

fn parse_field<T: FromStr>(field: &str, whole: &str) -> Result<T, TimeError> {
    field
        .trim()
        .parse()
        .map_err(|_| TimeError::Parse(format!("bad number '{field}' in '{whole}'")))
}
