//! Civil calendar support for the sizhu pillar engine.
//!
//! This crate provides:
//! - Julian Day Number <-> proleptic Gregorian conversions
//! - Validated [`CivilDate`] and [`ClockTime`] values (never clamped)
//! - [`BirthMoment`], a date with an optional time of day

pub mod civil;
pub mod error;
pub mod julian;

pub use civil::{BirthMoment, CivilDate, ClockTime, jd_to_civil_date};
pub use error::TimeError;
pub use julian::{
    J2000_JDN, MINUTES_PER_DAY, calendar_to_jdn, days_in_month, is_leap_year, jd_to_local_jdn,
    jdn_to_calendar,
};
