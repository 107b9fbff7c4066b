//! Error types for stem/branch parsing and solar-term lookup.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from parsing stems, branches and pillars.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GanzhiError {
    /// Text is not one of the ten stems.
    UnknownStem(String),
    /// Text is not one of the twelve branches.
    UnknownBranch(String),
    /// Text is not a two-character pillar, or the stem and branch differ in parity.
    InvalidPillar(String),
}

impl Display for GanzhiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStem(s) => write!(f, "unknown stem: '{s}'"),
            Self::UnknownBranch(s) => write!(f, "unknown branch: '{s}'"),
            Self::InvalidPillar(s) => write!(f, "invalid pillar: '{s}'"),
        }
    }
}

impl Error for GanzhiError {}

/// Errors from a solar-term provider.
///
/// These never reach callers of the pillar calculators: a failing precise
/// provider is replaced by the approximate table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SolarTermError {
    /// The provider has no data for this year.
    UnsupportedYear(i32),
    /// The provider could not produce a date (root not bracketed, backend down, ...).
    Unavailable(String),
    /// Term dates are not strictly increasing.
    OutOfOrder(i32),
}

impl Display for SolarTermError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedYear(y) => write!(f, "no solar-term data for year {y}"),
            Self::Unavailable(msg) => write!(f, "solar terms unavailable: {msg}"),
            Self::OutOfOrder(y) => write!(f, "solar-term dates for {y} are not increasing"),
        }
    }
}

impl Error for SolarTermError {}
