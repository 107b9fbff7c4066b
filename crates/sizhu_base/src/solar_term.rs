//! The twelve month-opening solar terms (節) and where their dates come from.
//!
//! A solar year runs from Start of Spring (立春) to the next Start of Spring
//! and is cut into twelve months by the major terms. The dates come from a
//! [`SolarTermProvider`]; [`SolarTermSource`] fixes once, at configuration
//! time, whether a precise provider is consulted, and always falls back to
//! the approximate table when it fails.

use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use sizhu_time::{CivilDate, calendar_to_jdn};
use tracing::warn;

use crate::error::SolarTermError;
use crate::ganzhi::Branch;

/// The twelve major solar terms, in solar-year order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MajorTerm {
    /// 立春, opens the 寅 month.
    StartOfSpring,
    /// 惊蛰
    AwakeningOfInsects,
    /// 清明
    ClearAndBright,
    /// 立夏
    StartOfSummer,
    /// 芒种
    GrainInEar,
    /// 小暑
    MinorHeat,
    /// 立秋
    StartOfAutumn,
    /// 白露
    WhiteDew,
    /// 寒露
    ColdDew,
    /// 立冬
    StartOfWinter,
    /// 大雪
    MajorSnow,
    /// 小寒, opens the 丑 month in January of the next calendar year.
    MinorCold,
}

/// All 12 major terms (index 0 = 立春).
pub const ALL_MAJOR_TERMS: [MajorTerm; 12] = [
    MajorTerm::StartOfSpring,
    MajorTerm::AwakeningOfInsects,
    MajorTerm::ClearAndBright,
    MajorTerm::StartOfSummer,
    MajorTerm::GrainInEar,
    MajorTerm::MinorHeat,
    MajorTerm::StartOfAutumn,
    MajorTerm::WhiteDew,
    MajorTerm::ColdDew,
    MajorTerm::StartOfWinter,
    MajorTerm::MajorSnow,
    MajorTerm::MinorCold,
];

const TERM_NAMES: [&str; 12] = [
    "立春", "惊蛰", "清明", "立夏", "芒种", "小暑", "立秋", "白露", "寒露", "立冬", "大雪", "小寒",
];

/// Fallback (month, day) of each term, in the calendar year it falls in.
const APPROXIMATE_DATES: [(u32, u32); 12] = [
    (2, 4),
    (3, 6),
    (4, 5),
    (5, 6),
    (6, 6),
    (7, 7),
    (8, 7),
    (9, 7),
    (10, 8),
    (11, 7),
    (12, 7),
    (1, 6),
];

impl MajorTerm {
    /// 0-based index (立春=0 .. 小寒=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        TERM_NAMES[self.index() as usize]
    }

    /// Apparent solar longitude at which the term begins (315° for 立春, +30° each).
    pub fn solar_longitude_deg(self) -> f64 {
        (315.0 + 30.0 * f64::from(self.index())) % 360.0
    }

    /// Month branch of the interval this term opens (寅 for 立春 .. 丑 for 小寒).
    pub const fn month_branch(self) -> Branch {
        Branch::Yin.offset(self.index() as i64)
    }

    /// Calendar year of this term within solar year `solar_year`.
    pub const fn calendar_year(self, solar_year: i32) -> i32 {
        match self {
            Self::MinorCold => solar_year + 1,
            _ => solar_year,
        }
    }

    /// Fallback (month, day) used when no precise date is available.
    pub const fn approximate_month_day(self) -> (u32, u32) {
        APPROXIMATE_DATES[self.index() as usize]
    }
}

impl Display for MajorTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Boundary dates of one solar year: the twelve major terms plus the
/// following year's Start of Spring, which closes the 丑 month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorTerms {
    solar_year: i32,
    dates: [CivilDate; 12],
    next_start_of_spring: CivilDate,
}

impl MajorTerms {
    /// Build a term table, checking the dates strictly increase.
    pub fn new(
        solar_year: i32,
        dates: [CivilDate; 12],
        next_start_of_spring: CivilDate,
    ) -> Result<Self, SolarTermError> {
        let increasing = dates.windows(2).all(|w| w[0] < w[1]);
        if !increasing || dates[11] >= next_start_of_spring {
            return Err(SolarTermError::OutOfOrder(solar_year));
        }
        Ok(Self {
            solar_year,
            dates,
            next_start_of_spring,
        })
    }

    /// The solar year (the calendar year of its Start of Spring).
    pub fn solar_year(&self) -> i32 {
        self.solar_year
    }

    pub fn start_of_spring(&self) -> CivilDate {
        self.dates[0]
    }

    pub fn next_start_of_spring(&self) -> CivilDate {
        self.next_start_of_spring
    }

    pub fn date_of(&self, term: MajorTerm) -> CivilDate {
        self.dates[term.index() as usize]
    }

    /// `(term, date)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (MajorTerm, CivilDate)> + '_ {
        ALL_MAJOR_TERMS.into_iter().zip(self.dates.iter().copied())
    }

    /// Whether `date` falls in `[start_of_spring, next_start_of_spring)`.
    pub fn contains(&self, date: CivilDate) -> bool {
        (self.dates[0]..self.next_start_of_spring).contains(&date)
    }

    /// The term whose interval `[term_i, term_{i+1})` contains `date`.
    ///
    /// The last interval (小寒) ends at the next year's Start of Spring.
    pub fn term_for(&self, date: CivilDate) -> Option<MajorTerm> {
        if !self.contains(date) {
            return None;
        }
        let idx = self.dates.partition_point(|d| *d <= date) - 1;
        Some(ALL_MAJOR_TERMS[idx])
    }

    /// Month branch for `date`, or `None` when it lies outside this solar year.
    pub fn branch_for(&self, date: CivilDate) -> Option<Branch> {
        self.term_for(date).map(MajorTerm::month_branch)
    }
}

/// A source of solar-term dates for a given solar year.
///
/// Implementations may be backed by an ephemeris, a remote service or a
/// fixed table; errors are recovered by [`SolarTermSource`].
pub trait SolarTermProvider: Send + Sync {
    /// The twelve major terms of `solar_year` plus the next Start of Spring.
    fn major_terms(&self, solar_year: i32) -> Result<MajorTerms, SolarTermError>;

    /// Date of Start of Spring in calendar year `year`.
    fn start_of_spring(&self, year: i32) -> Result<CivilDate, SolarTermError> {
        Ok(self.major_terms(year)?.start_of_spring())
    }
}

/// Fixed month/day table (立春 = Feb 4, ...). Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproximateTerms;

impl ApproximateTerms {
    /// Table dates for `solar_year`.
    pub fn terms(&self, solar_year: i32) -> MajorTerms {
        let dates = ALL_MAJOR_TERMS.map(|t| approximate_date(t, solar_year));
        MajorTerms {
            solar_year,
            dates,
            next_start_of_spring: approximate_date(MajorTerm::StartOfSpring, solar_year + 1),
        }
    }

    pub fn start_of_spring_date(&self, year: i32) -> CivilDate {
        approximate_date(MajorTerm::StartOfSpring, year)
    }
}

impl SolarTermProvider for ApproximateTerms {
    fn major_terms(&self, solar_year: i32) -> Result<MajorTerms, SolarTermError> {
        Ok(self.terms(solar_year))
    }

    fn start_of_spring(&self, year: i32) -> Result<CivilDate, SolarTermError> {
        Ok(self.start_of_spring_date(year))
    }
}

fn approximate_date(term: MajorTerm, solar_year: i32) -> CivilDate {
    let (month, day) = term.approximate_month_day();
    // Every table entry exists in every year, so go through the JDN rather
    // than the checked constructor.
    CivilDate::from_jdn(calendar_to_jdn(term.calendar_year(solar_year), month, day))
}

/// Which tier supplied a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundarySource {
    /// Caller supplied the month branch directly.
    Manual,
    /// Precise provider.
    Precise,
    /// Static approximate table.
    Approximate,
}

impl BoundarySource {
    /// Short tag used in provenance strings.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Precise => "precise",
            Self::Approximate => "approx",
        }
    }
}

impl Display for BoundarySource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A value together with the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: BoundarySource,
}

/// Solar-term source chosen once at configuration time.
#[derive(Clone, Default)]
pub enum SolarTermSource {
    /// Approximate table only.
    #[default]
    Approximate,
    /// Precise provider, with the approximate table as fallback.
    Precise(Arc<dyn SolarTermProvider>),
}

impl Debug for SolarTermSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approximate => f.write_str("Approximate"),
            Self::Precise(_) => f.write_str("Precise(..)"),
        }
    }
}

impl SolarTermSource {
    /// Wrap a precise provider.
    pub fn precise<P: SolarTermProvider + 'static>(provider: P) -> Self {
        Self::Precise(Arc::new(provider))
    }

    pub fn is_precise(&self) -> bool {
        matches!(self, Self::Precise(_))
    }

    /// Term table for `solar_year`, falling back to the table on failure.
    pub fn resolve_major_terms(&self, solar_year: i32) -> Resolved<MajorTerms> {
        if let Self::Precise(provider) = self {
            match provider.major_terms(solar_year) {
                Ok(value) => {
                    return Resolved {
                        value,
                        source: BoundarySource::Precise,
                    };
                }
                Err(e) => {
                    warn!(solar_year, error = %e, "precise solar terms failed, using approximate table");
                }
            }
        }
        Resolved {
            value: ApproximateTerms.terms(solar_year),
            source: BoundarySource::Approximate,
        }
    }

    /// Start of Spring in calendar year `year`, falling back to Feb 4 on failure.
    pub fn resolve_start_of_spring(&self, year: i32) -> Resolved<CivilDate> {
        if let Self::Precise(provider) = self {
            match provider.start_of_spring(year) {
                Ok(value) => {
                    return Resolved {
                        value,
                        source: BoundarySource::Precise,
                    };
                }
                Err(e) => {
                    warn!(year, error = %e, "precise start of spring failed, using approximate table");
                }
            }
        }
        Resolved {
            value: ApproximateTerms.start_of_spring_date(year),
            source: BoundarySource::Approximate,
        }
    }
}
