//! Julian Day Number <-> proleptic Gregorian calendar conversions.
//!
//! Integer-only formulas (Fliegel & Van Flandern). Valid for all dates with
//! a non-negative JDN, which comfortably covers the years the pillar engine
//! is used for.

/// Julian Day Number of 2000-01-01.
pub const J2000_JDN: i64 = 2_451_545;

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Whether `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or 0 for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Julian Day Number of a Gregorian calendar date.
///
/// No validation is performed; use [`crate::CivilDate::new`] for checked input.
pub const fn calendar_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let (y, m, d) = (year as i64, month as i64, day as i64);
    let a = (m - 14) / 12;
    (1461 * (y + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
        - (3 * ((y + 4900 + a) / 100)) / 4
        + d
        - 32075
}

/// Gregorian calendar date `(year, month, day)` of a Julian Day Number.
pub fn jdn_to_calendar(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
    (year as i32, month as u32, day as u32)
}

/// JDN of the civil day containing the continuous Julian Date `jd`, in a zone
/// `utc_offset_minutes` east of Greenwich.
pub fn jd_to_local_jdn(jd: f64, utc_offset_minutes: i32) -> i64 {
    (jd + 0.5 + f64::from(utc_offset_minutes) / MINUTES_PER_DAY).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_jdn() {
        assert_eq!(calendar_to_jdn(2000, 1, 1), J2000_JDN);
        assert_eq!(jdn_to_calendar(J2000_JDN), (2000, 1, 1));
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1984));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn february_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn month_boundaries_are_contiguous() {
        for month in 1..=12 {
            let last = calendar_to_jdn(1999, month, days_in_month(1999, month));
            let (y, m, d) = jdn_to_calendar(last + 1);
            if month == 12 {
                assert_eq!((y, m, d), (2000, 1, 1));
            } else {
                assert_eq!((y, m, d), (1999, month + 1, 1));
            }
        }
    }

    #[test]
    fn local_jdn_crosses_midnight_with_offset() {
        // 2000-01-01 17:00 UTC is 2000-01-02 01:00 at UTC+8.
        let jd = J2000_JDN as f64 - 0.5 + 17.0 / 24.0;
        assert_eq!(jd_to_local_jdn(jd, 0), J2000_JDN);
        assert_eq!(jd_to_local_jdn(jd, 480), J2000_JDN + 1);
    }
}
