//! Types for four-pillar derivation results and configuration.

use std::fmt::{Display, Formatter};

use sizhu_base::{
    AstronomicalTerms, BoundarySource, Branch, HourPillar, MajorTerm, Pillar, SolarTermSource,
};
use sizhu_time::BirthMoment;

/// One of the four pillar positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PillarField {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

impl Display for PillarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Year, month, day and hour pillars of one birth moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: HourPillar,
}

impl FourPillars {
    pub fn new(year: Pillar, month: Pillar, day: Pillar, hour: HourPillar) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// Known pillars in year → month → day → hour order; an unknown hour is omitted.
    pub fn present(&self) -> Vec<Pillar> {
        let mut out = vec![self.year, self.month, self.day];
        out.extend(self.hour.pillar());
        out
    }
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// Which pillar wins for the hour when a reference chart is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourPolicy {
    /// Always use the five-rat rule.
    #[default]
    Rule,
    /// Use the reference hour pillar when it has one.
    PreferReference,
}

/// Calculation settings, passed explicitly to every derivation.
#[derive(Debug, Clone, Default)]
pub struct ChartConfig {
    /// Month branch to use instead of solar-term segmentation.
    pub manual_month_branch: Option<Branch>,
    /// Where solar-term boundaries come from.
    pub solar_terms: SolarTermSource,
    /// Hour pillar choice when a reference chart is supplied.
    pub hour_policy: HourPolicy,
}

impl ChartConfig {
    /// Approximate term table, rule-based hour (the default).
    pub fn approximate() -> Self {
        Self::default()
    }

    /// Astronomical term dates at UTC+8, with the table as fallback.
    pub fn precise() -> Self {
        Self {
            solar_terms: SolarTermSource::precise(AstronomicalTerms::default()),
            ..Self::default()
        }
    }

    pub fn with_manual_month_branch(mut self, branch: Branch) -> Self {
        self.manual_month_branch = Some(branch);
        self
    }

    pub fn with_solar_terms(mut self, source: SolarTermSource) -> Self {
        self.solar_terms = source;
        self
    }

    pub fn with_hour_policy(mut self, policy: HourPolicy) -> Self {
        self.hour_policy = policy;
        self
    }
}

/// Where the hour pillar came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourSource {
    /// Five-rat rule.
    Rule,
    /// Reference chart (see [`HourPolicy::PreferReference`]).
    Reference,
    /// No birth time.
    Unknown,
}

impl HourSource {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Reference => "reference",
            Self::Unknown => "unknown",
        }
    }
}

/// Which tier supplied each boundary of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub year: BoundarySource,
    pub month: BoundarySource,
    pub hour: HourSource,
}

impl Display for Provenance {
    /// Renders e.g. `approx_year;manual_month;rule_hour`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}_year;{}_month;{}_hour",
            self.year.tag(),
            self.month.tag(),
            self.hour.tag()
        )
    }
}

/// Pillars reported by an external calendar service, any of which may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferencePillars {
    pub year: Option<Pillar>,
    pub month: Option<Pillar>,
    pub day: Option<Pillar>,
    pub hour: Option<Pillar>,
}

/// A reference pillar that differs from the computed one. Informational only;
/// the computed value stays authoritative (except a preferred reference hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrepancy {
    pub field: PillarField,
    pub computed: Pillar,
    pub reference: Pillar,
}

impl Display for Discrepancy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: computed {}, reference {}",
            self.field, self.computed, self.reference
        )
    }
}

/// Result of one derivation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FourPillarChart {
    pub moment: BirthMoment,
    pub pillars: FourPillars,
    pub provenance: Provenance,
    /// Year the year pillar was counted from (Start-of-Spring based).
    pub effective_year: i32,
    /// Solar term that opened the month, when segmentation was used.
    pub month_term: Option<MajorTerm>,
    /// Differences against a reference chart, if one was supplied.
    pub discrepancies: Vec<Discrepancy>,
}
