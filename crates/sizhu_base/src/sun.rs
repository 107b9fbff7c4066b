//! Astronomical solar-term dates from a low-precision solar theory.
//!
//! The Sun's apparent ecliptic longitude follows the short series in
//! Meeus, *Astronomical Algorithms*, ch. 25 (≈0.01°, i.e. well under half an
//! hour of solar motion). Each term is the instant the longitude reaches the
//! term's value, found by bisection on
//! f(t) = normalize(λ(t) − target) ∈ (−180, 180].
//!
//! ΔT is ignored: the root is treated as UT. The resulting civil dates can
//! only be off when a term falls within a few minutes of local midnight.

use std::ops::RangeInclusive;

use sizhu_time::{CivilDate, calendar_to_jdn, jd_to_civil_date};

use crate::error::SolarTermError;
use crate::solar_term::{ALL_MAJOR_TERMS, MajorTerm, MajorTerms, SolarTermProvider};

/// Julian Date of J2000.0.
const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Half-width of the bisection bracket around the table date, in days.
const BRACKET_DAYS: f64 = 10.0;

/// Bisection stops once the bracket is narrower than this (≈0.1 s).
const CONVERGENCE_DAYS: f64 = 1e-6;

const MAX_ITERATIONS: u32 = 60;

/// China Standard Time, the zone the traditional calendar is reckoned in.
pub const CHINA_STANDARD_OFFSET_MINUTES: i32 = 480;

/// Years the solar series is trusted for.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1600..=2400;

/// Normalize an angle to (-180, +180].
fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360).
pub fn sun_apparent_longitude_deg(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / DAYS_PER_CENTURY;
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1934.136 * t).to_radians();
    let apparent = l0 + c - 0.005_69 - 0.004_78 * omega.sin();
    apparent.rem_euclid(360.0)
}

/// Julian Date (UT, see module notes) at which `term` begins in `solar_year`.
pub fn term_instant_jd(term: MajorTerm, solar_year: i32) -> Result<f64, SolarTermError> {
    let (month, day) = term.approximate_month_day();
    let guess = calendar_to_jdn(term.calendar_year(solar_year), month, day) as f64 - 0.5;
    let target = term.solar_longitude_deg();
    let f = |jd: f64| normalize_to_pm180(sun_apparent_longitude_deg(jd) - target);

    let mut t_a = guess - BRACKET_DAYS;
    let mut t_b = guess + BRACKET_DAYS;
    let mut f_a = f(t_a);
    let f_b = f(t_b);
    if f_a >= 0.0 || f_b < 0.0 {
        return Err(SolarTermError::Unavailable(format!(
            "{term} {solar_year}: longitude not bracketed ({f_a:.3}, {f_b:.3})"
        )));
    }

    for _ in 0..MAX_ITERATIONS {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid);
        if f_mid < 0.0 {
            t_a = t_mid;
            f_a = f_mid;
        } else {
            t_b = t_mid;
        }
        if t_b - t_a < CONVERGENCE_DAYS {
            break;
        }
    }
    debug_assert!(f_a < 0.0);
    Ok(t_b)
}

/// Precise provider computing term dates from the solar theory above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstronomicalTerms {
    utc_offset_minutes: i32,
}

impl Default for AstronomicalTerms {
    fn default() -> Self {
        Self {
            utc_offset_minutes: CHINA_STANDARD_OFFSET_MINUTES,
        }
    }
}

impl AstronomicalTerms {
    /// Reckon term dates in a zone `minutes` east of UTC.
    pub fn with_utc_offset_minutes(minutes: i32) -> Self {
        Self {
            utc_offset_minutes: minutes,
        }
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    fn check_year(year: i32) -> Result<(), SolarTermError> {
        if SUPPORTED_YEARS.contains(&year) {
            Ok(())
        } else {
            Err(SolarTermError::UnsupportedYear(year))
        }
    }

    /// Local civil date on which `term` begins in `solar_year`.
    pub fn term_date(&self, term: MajorTerm, solar_year: i32) -> Result<CivilDate, SolarTermError> {
        Self::check_year(solar_year)?;
        let jd = term_instant_jd(term, solar_year)?;
        Ok(jd_to_civil_date(jd, self.utc_offset_minutes))
    }
}

impl SolarTermProvider for AstronomicalTerms {
    fn major_terms(&self, solar_year: i32) -> Result<MajorTerms, SolarTermError> {
        let mut dates = Vec::with_capacity(12);
        for term in ALL_MAJOR_TERMS {
            dates.push(self.term_date(term, solar_year)?);
        }
        let next = self.term_date(MajorTerm::StartOfSpring, solar_year + 1)?;
        let dates: [CivilDate; 12] = dates
            .try_into()
            .map_err(|_| SolarTermError::Unavailable("term count".to_string()))?;
        MajorTerms::new(solar_year, dates, next)
    }

    fn start_of_spring(&self, year: i32) -> Result<CivilDate, SolarTermError> {
        self.term_date(MajorTerm::StartOfSpring, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps() {
        assert_eq!(normalize_to_pm180(190.0), -170.0);
        assert_eq!(normalize_to_pm180(-190.0), 170.0);
        assert_eq!(normalize_to_pm180(180.0), 180.0);
    }

    #[test]
    fn longitude_at_j2000() {
        // Meeus: apparent longitude ≈ 280.37° at 2000-01-01 12:00 TT.
        let lon = sun_apparent_longitude_deg(J2000_JD);
        assert!((lon - 280.37).abs() < 0.05, "got {lon}");
    }

    #[test]
    fn march_equinox_2000_near_zero() {
        // Equinox 2000-03-20 07:35 UT.
        let jd = calendar_to_jdn(2000, 3, 20) as f64 - 0.5 + 7.6 / 24.0;
        let lon = normalize_to_pm180(sun_apparent_longitude_deg(jd));
        assert!(lon.abs() < 0.03, "got {lon}");
    }

    #[test]
    fn instant_hits_target_longitude() {
        let jd = term_instant_jd(MajorTerm::StartOfSpring, 2024).unwrap();
        let lon = sun_apparent_longitude_deg(jd);
        assert!((lon - 315.0).abs() < 1e-4, "got {lon}");
    }

    #[test]
    fn unsupported_year_rejected() {
        let p = AstronomicalTerms::default();
        assert_eq!(
            p.start_of_spring(1200),
            Err(SolarTermError::UnsupportedYear(1200))
        );
    }

    #[test]
    fn terms_are_increasing() {
        let p = AstronomicalTerms::default();
        let terms = p.major_terms(1990).unwrap();
        assert_eq!(terms.solar_year(), 1990);
        assert!(terms.start_of_spring() < terms.next_start_of_spring());
    }
}
