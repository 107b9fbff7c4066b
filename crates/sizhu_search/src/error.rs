//! Error types for chart derivation, manual pillar entry and lunar input.

use std::error::Error;
use std::fmt::{Display, Formatter};

use sizhu_base::GanzhiError;
use sizhu_time::TimeError;

use crate::chart_types::PillarField;

/// Errors surfaced to callers of the chart functions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartError {
    /// Invalid civil date or time of day.
    Time(TimeError),
    /// Invalid stem/branch text outside a pillar field (e.g. a manual month branch).
    Ganzhi(GanzhiError),
    /// A required pillar (year, month or day) was left blank.
    MissingPillar(PillarField),
    /// A pillar field does not hold a valid sexagenary pillar.
    MalformedPillar { field: PillarField, text: String },
    /// Lunar month/day outside 1..=12 / 1..=30.
    InvalidLunarDate { year: i32, month: u32, day: u32 },
    /// The lunar-to-solar converter could not convert the date.
    Conversion(String),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Ganzhi(e) => write!(f, "ganzhi error: {e}"),
            Self::MissingPillar(field) => write!(f, "{field} pillar is required"),
            Self::MalformedPillar { field, text } => {
                write!(f, "{field} pillar '{text}' is not a valid pillar")
            }
            Self::InvalidLunarDate { year, month, day } => {
                write!(f, "invalid lunar date: {year} month {month} day {day}")
            }
            Self::Conversion(msg) => write!(f, "lunar conversion failed: {msg}"),
        }
    }
}

impl Error for ChartError {}

impl From<ConversionError> for ChartError {
    fn from(e: ConversionError) -> Self {
        Self::Conversion(e.0)
    }
}

impl From<TimeError> for ChartError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<GanzhiError> for ChartError {
    fn from(e: GanzhiError) -> Self {
        Self::Ganzhi(e)
    }
}

/// Failure reported by a lunar-to-solar converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError(pub String);

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ConversionError {}
