//! Four pillars entered by hand instead of derived from a date.

use sizhu_base::{HourPillar, Pillar};

use crate::chart_types::{FourPillars, PillarField};
use crate::error::ChartError;

/// Hour text meaning "no hour pillar". Blank text means the same.
pub const UNKNOWN_HOUR_MARKERS: [&str; 3] = ["不知道", "不要", "不要时"];

/// Raw text of the four pillar fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualEntry<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
    pub hour: &'a str,
}

impl<'a> ManualEntry<'a> {
    pub fn new(year: &'a str, month: &'a str, day: &'a str, hour: &'a str) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }
}

fn required(field: PillarField, text: &str) -> Result<Pillar, ChartError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ChartError::MissingPillar(field));
    }
    parse_field(field, text)
}

fn parse_field(field: PillarField, text: &str) -> Result<Pillar, ChartError> {
    text.parse().map_err(|_| ChartError::MalformedPillar {
        field,
        text: text.to_string(),
    })
}

fn hour_field(text: &str) -> Result<HourPillar, ChartError> {
    let text = text.trim();
    if text.is_empty() || UNKNOWN_HOUR_MARKERS.contains(&text) {
        return Ok(HourPillar::Unknown);
    }
    parse_field(PillarField::Hour, text).map(HourPillar::Known)
}

/// Validate manually entered pillars. Fields are checked in year, month,
/// day, hour order and the first bad one is reported.
pub fn parse_manual_pillars(entry: &ManualEntry<'_>) -> Result<FourPillars, ChartError> {
    Ok(FourPillars::new(
        required(PillarField::Year, entry.year)?,
        required(PillarField::Month, entry.month)?,
        required(PillarField::Day, entry.day)?,
        hour_field(entry.hour)?,
    ))
}
