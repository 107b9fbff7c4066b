//! Lunar-calendar input.
//!
//! The engine does not convert lunar dates itself; callers plug in a
//! [`LunarToSolarConverter`] and the converted civil date goes through the
//! ordinary derivation.

use sizhu_time::{BirthMoment, CivilDate, ClockTime};

use crate::chart::derive_chart;
use crate::chart_types::{ChartConfig, FourPillarChart};
use crate::error::{ChartError, ConversionError};

/// A date in the traditional lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    year: i32,
    month: u32,
    day: u32,
    is_leap_month: bool,
}

impl LunarDate {
    /// Month must be 1..=12 and day 1..=30. Whether a given month really has
    /// a 30th day, or a leap counterpart, is up to the converter.
    pub fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> Result<Self, ChartError> {
        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            return Err(ChartError::InvalidLunarDate { year, month, day });
        }
        Ok(Self {
            year,
            month,
            day,
            is_leap_month,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_month(&self) -> bool {
        self.is_leap_month
    }
}

/// Converts lunar dates to proleptic Gregorian dates.
pub trait LunarToSolarConverter {
    fn convert(&self, date: &LunarDate) -> Result<CivilDate, ConversionError>;
}

/// Convert `lunar` with `converter`, then derive as for a civil date.
pub fn derive_chart_from_lunar<C: LunarToSolarConverter + ?Sized>(
    lunar: &LunarDate,
    time: Option<ClockTime>,
    converter: &C,
    config: &ChartConfig,
) -> Result<FourPillarChart, ChartError> {
    let date = converter.convert(lunar)?;
    Ok(derive_chart(&BirthMoment::new(date, time), config))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Knows one date: lunar 1990-04-24 (non-leap) is 1990-05-18.
    struct OneDate;

    impl LunarToSolarConverter for OneDate {
        fn convert(&self, date: &LunarDate) -> Result<CivilDate, ConversionError> {
            if (date.year(), date.month(), date.day(), date.is_leap_month()) == (1990, 4, 24, false) {
                Ok(CivilDate::new(1990, 5, 18).unwrap())
            } else {
                Err(ConversionError(format!("no table entry for {date:?}")))
            }
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(LunarDate::new(1990, 13, 1, false).is_err());
        assert!(LunarDate::new(1990, 1, 31, false).is_err());
        assert!(LunarDate::new(1990, 0, 1, false).is_err());
    }

    #[test]
    fn converted_date_is_derived() {
        let lunar = LunarDate::new(1990, 4, 24, false).unwrap();
        let time = Some(ClockTime::new(8, 0).unwrap());
        let chart = derive_chart_from_lunar(&lunar, time, &OneDate, &ChartConfig::default()).unwrap();
        assert_eq!(chart.pillars.to_string(), "庚午 辛巳 癸未 丙辰");
    }

    #[test]
    fn converter_failure_is_surfaced() {
        let lunar = LunarDate::new(1990, 4, 24, true).unwrap();
        let err = derive_chart_from_lunar(&lunar, None, &OneDate, &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::Conversion(_)));
    }
}
