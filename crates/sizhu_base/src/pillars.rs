//! Year, month, day and hour pillar calculators.
//!
//! Conventions:
//! - Day: elapsed days from the anchor 1984-01-01 = 甲午 (cycle index 30),
//!   with 23:00 and later counted as the next day.
//! - Year: changes at Start of Spring, not January 1; 1984 is a 甲子 year.
//! - Month: branch from the major-term interval (寅 from Start of Spring),
//!   stem from the year stem by the five-tiger rule.
//! - Hour: twelve two-hour branches with 子 spanning 23:00–01:00,
//!   stem from the day stem by the five-rat rule.

use std::fmt::{Display, Formatter};

use sizhu_time::{CivilDate, ClockTime, calendar_to_jdn};
use tracing::warn;

use crate::ganzhi::{Branch, Pillar, Stem, pillar_at};
use crate::solar_term::{ApproximateTerms, BoundarySource, MajorTerm, SolarTermSource};

/// Anchor date for day counting.
pub const DAY_ANCHOR_YMD: (i32, u32, u32) = (1984, 1, 1);

/// Julian Day Number of [`DAY_ANCHOR_YMD`].
pub const DAY_ANCHOR_JDN: i64 = calendar_to_jdn(DAY_ANCHOR_YMD.0, DAY_ANCHOR_YMD.1, DAY_ANCHOR_YMD.2);

/// Cycle index of the anchor day (甲午).
pub const DAY_ANCHOR_INDEX: u8 = 30;

/// A 甲子 year, the origin of year counting.
pub const YEAR_EPOCH: i32 = 1984;

/// From this hour on, the day pillar belongs to the next civil day.
pub const DAY_ROLLOVER_HOUR: u32 = 23;

/// Text shown for an hour pillar that cannot be determined.
pub const UNKNOWN_HOUR_TEXT: &str = "不知道";

// ---------------------------------------------------------------------------
// Day
// ---------------------------------------------------------------------------

/// Day pillar of `date`; an `hour` of 23 rolls over to the next day.
pub fn day_pillar(date: CivilDate, hour: Option<u32>) -> Pillar {
    let target = match hour {
        Some(h) if h >= DAY_ROLLOVER_HOUR => date.add_days(1),
        _ => date,
    };
    let delta = target.jdn() - DAY_ANCHOR_JDN;
    pillar_at(i64::from(DAY_ANCHOR_INDEX) + delta)
}

// ---------------------------------------------------------------------------
// Year
// ---------------------------------------------------------------------------

/// Year pillar together with the year it was counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearResolution {
    pub pillar: Pillar,
    /// `date.year()`, or the year before when `date` precedes Start of Spring.
    pub effective_year: i32,
    pub start_of_spring: CivilDate,
    pub source: BoundarySource,
}

/// Pillar of the (Start-of-Spring based) year `effective_year`.
pub fn pillar_for_year(effective_year: i32) -> Pillar {
    pillar_at(i64::from(effective_year) - i64::from(YEAR_EPOCH))
}

/// Year counted from Start of Spring: dates before it belong to the previous year.
pub fn effective_year(date: CivilDate, start_of_spring: CivilDate) -> i32 {
    if date < start_of_spring {
        date.year() - 1
    } else {
        date.year()
    }
}

/// Resolve the year pillar of `date` against `source`.
pub fn resolve_year(date: CivilDate, source: &SolarTermSource) -> YearResolution {
    let sos = source.resolve_start_of_spring(date.year());
    let effective_year = effective_year(date, sos.value);
    YearResolution {
        pillar: pillar_for_year(effective_year),
        effective_year,
        start_of_spring: sos.value,
        source: sos.source,
    }
}

/// Year pillar of `date`.
pub fn year_pillar(date: CivilDate, source: &SolarTermSource) -> Pillar {
    resolve_year(date, source).pillar
}

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

/// Month branch together with the term that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthResolution {
    pub branch: Branch,
    /// Opening term, `None` for a manual branch.
    pub term: Option<MajorTerm>,
    pub term_date: Option<CivilDate>,
    pub source: BoundarySource,
}

/// Five-tiger rule: stem of the 寅 month for a year stem.
///
/// 甲/己 → 丙, 乙/庚 → 戊, 丙/辛 → 庚, 丁/壬 → 壬, 戊/癸 → 甲.
pub const fn month_stem_origin(year_stem: Stem) -> Stem {
    Stem::from_index((year_stem.index() % 5) as i64 * 2 + 2)
}

/// Month pillar from a year stem and month branch.
pub fn month_pillar_from_branch(year_stem: Stem, branch: Branch) -> Pillar {
    let offset = Branch::Yin.index() as i64;
    let months_from_tiger = (branch.index() as i64 - offset).rem_euclid(12);
    let stem = month_stem_origin(year_stem).offset(months_from_tiger);
    // The tiger stem is always yang and 寅 is yang, so parities stay equal.
    pillar_at(cycle_position(stem, branch))
}

/// Month branch of `date`.
///
/// Precedence: manual branch, then the source's term table for the solar
/// year containing `date`, then the approximate table.
pub fn resolve_month_branch(
    date: CivilDate,
    manual_branch: Option<Branch>,
    source: &SolarTermSource,
) -> MonthResolution {
    if let Some(branch) = manual_branch {
        return MonthResolution {
            branch,
            term: None,
            term_date: None,
            source: BoundarySource::Manual,
        };
    }

    let mut resolved = source.resolve_major_terms(date.year());
    if date < resolved.value.start_of_spring() {
        resolved = source.resolve_major_terms(date.year() - 1);
    }
    if let Some(term) = resolved.value.term_for(date) {
        return MonthResolution {
            branch: term.month_branch(),
            term: Some(term),
            term_date: Some(resolved.value.date_of(term)),
            source: resolved.source,
        };
    }

    // Only reachable when a precise provider disagrees with itself across
    // adjacent years.
    warn!(%date, "date not covered by solar-term table, using approximate table");
    let approx = ApproximateTerms;
    let terms = approx.terms(date.year());
    let terms = if terms.contains(date) {
        terms
    } else {
        approx.terms(date.year() - 1)
    };
    match terms.term_for(date) {
        Some(term) => MonthResolution {
            branch: term.month_branch(),
            term: Some(term),
            term_date: Some(terms.date_of(term)),
            source: BoundarySource::Approximate,
        },
        None => MonthResolution {
            branch: Branch::from_index(i64::from(date.month())),
            term: None,
            term_date: None,
            source: BoundarySource::Approximate,
        },
    }
}

/// Month branch of `date` (see [`resolve_month_branch`]).
pub fn month_branch(
    date: CivilDate,
    manual_branch: Option<Branch>,
    source: &SolarTermSource,
) -> Branch {
    resolve_month_branch(date, manual_branch, source).branch
}

/// Month pillar of `date` for a year with stem `year_stem`.
pub fn month_pillar(
    date: CivilDate,
    year_stem: Stem,
    manual_branch: Option<Branch>,
    source: &SolarTermSource,
) -> Pillar {
    month_pillar_from_branch(year_stem, month_branch(date, manual_branch, source))
}

// ---------------------------------------------------------------------------
// Hour
// ---------------------------------------------------------------------------

/// Hour pillar, or unknown when no birth time was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourPillar {
    Known(Pillar),
    Unknown,
}

impl HourPillar {
    pub fn pillar(self) -> Option<Pillar> {
        match self {
            Self::Known(p) => Some(p),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Option<Pillar>> for HourPillar {
    fn from(p: Option<Pillar>) -> Self {
        p.map_or(Self::Unknown, Self::Known)
    }
}

impl Display for HourPillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(p) => write!(f, "{p}"),
            Self::Unknown => f.write_str(UNKNOWN_HOUR_TEXT),
        }
    }
}

/// Hour branch by minute: 子 = [23:00, 01:00), then 丑 = [01:00, 03:00), ...,
/// 亥 = [21:00, 23:00).
pub fn hour_branch(time: ClockTime) -> Branch {
    let minutes = time.minutes_since_midnight();
    if minutes >= 23 * 60 || minutes < 60 {
        Branch::Zi
    } else {
        Branch::from_index(i64::from((minutes - 60) / 120 + 1))
    }
}

/// Five-rat rule: stem of the 子 hour for a day stem.
///
/// 甲/己 → 甲, 乙/庚 → 丙, 丙/辛 → 戊, 丁/壬 → 庚, 戊/癸 → 壬.
pub const fn hour_stem_origin(day_stem: Stem) -> Stem {
    Stem::from_index((day_stem.index() % 5) as i64 * 2)
}

/// Hour pillar for a day stem and optional time of day.
pub fn hour_pillar(day_stem: Stem, time: Option<ClockTime>) -> HourPillar {
    let Some(time) = time else {
        return HourPillar::Unknown;
    };
    let branch = hour_branch(time);
    let stem = hour_stem_origin(day_stem).offset(i64::from(branch.index()));
    HourPillar::Known(pillar_at(cycle_position(stem, branch)))
}

/// Cycle position of an equal-parity stem/branch pair.
fn cycle_position(stem: Stem, branch: Branch) -> i64 {
    6 * i64::from(stem.index()) - 5 * i64::from(branch.index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::{ALL_BRANCHES, ALL_STEMS};

    fn date(y: i32, m: u32, d: u32) -> CivilDate {
        CivilDate::new(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    #[test]
    fn anchor_constants_agree() {
        assert_eq!(DAY_ANCHOR_JDN, date(1984, 1, 1).jdn());
        assert_eq!(pillar_at(i64::from(DAY_ANCHOR_INDEX)).to_string(), "甲午");
    }

    #[test]
    fn anchor_day_is_jia_wu() {
        assert_eq!(day_pillar(date(1984, 1, 1), None).to_string(), "甲午");
        assert_eq!(day_pillar(date(1984, 1, 2), None).to_string(), "乙未");
        assert_eq!(day_pillar(date(1983, 12, 31), None).to_string(), "癸巳");
    }

    #[test]
    fn day_periodicity() {
        let d = date(1990, 5, 18);
        assert_eq!(day_pillar(d, None), day_pillar(d.add_days(60), None));
        assert_eq!(day_pillar(d, None), day_pillar(d.add_days(-600), None));
    }

    #[test]
    fn day_rolls_over_at_23() {
        let d = date(1990, 5, 18);
        assert_ne!(day_pillar(d, Some(22)), day_pillar(d, Some(23)));
        assert_eq!(day_pillar(d, Some(23)), day_pillar(d.add_days(1), Some(0)));
    }

    #[test]
    fn year_before_start_of_spring_is_previous_year() {
        let src = SolarTermSource::Approximate;
        let r = resolve_year(date(1990, 2, 1), &src);
        assert_eq!(r.effective_year, 1989);
        assert_eq!(r.pillar.to_string(), "己巳");
        assert_eq!(r.source, BoundarySource::Approximate);
        assert_eq!(year_pillar(date(1990, 2, 4), &src).to_string(), "庚午");
    }

    #[test]
    fn year_epoch_and_wrap() {
        assert_eq!(pillar_for_year(1984).to_string(), "甲子");
        assert_eq!(pillar_for_year(2044).to_string(), "甲子");
        assert_eq!(pillar_for_year(1983).to_string(), "癸亥");
        assert_eq!(pillar_for_year(2024).to_string(), "甲辰");
    }

    #[test]
    fn five_tiger_origins() {
        let expected = ["丙", "戊", "庚", "壬", "甲", "丙", "戊", "庚", "壬", "甲"];
        for (s, e) in ALL_STEMS.into_iter().zip(expected) {
            assert_eq!(month_stem_origin(s).name(), e);
        }
    }

    #[test]
    fn manual_month_branch_jia_yin() {
        let src = SolarTermSource::Approximate;
        let r = resolve_month_branch(date(1990, 5, 18), Some(Branch::Yin), &src);
        assert_eq!(r.source, BoundarySource::Manual);
        let p = month_pillar(date(1990, 5, 18), Stem::Jia, Some(Branch::Yin), &src);
        assert_eq!(p.to_string(), "丙寅");
    }

    #[test]
    fn month_stems_follow_tiger_rule() {
        assert_eq!(month_pillar_from_branch(Stem::Jia, Branch::Mao).to_string(), "丁卯");
        assert_eq!(month_pillar_from_branch(Stem::Jia, Branch::Chou).to_string(), "丁丑");
        assert_eq!(month_pillar_from_branch(Stem::Wu, Branch::Yin).to_string(), "甲寅");
        for s in ALL_STEMS {
            for b in ALL_BRANCHES {
                let p = month_pillar_from_branch(s, b);
                assert_eq!(p.branch(), b);
            }
        }
    }

    #[test]
    fn january_months_belong_to_previous_solar_year() {
        let src = SolarTermSource::Approximate;
        // Before 小寒: still the 子 month.
        let r = resolve_month_branch(date(1990, 1, 3), None, &src);
        assert_eq!(r.branch, Branch::Zi);
        assert_eq!(r.term, Some(MajorTerm::MajorSnow));
        assert_eq!(r.term_date, Some(date(1989, 12, 7)));
        // Between 小寒 and 立春: the 丑 month.
        let r = resolve_month_branch(date(1990, 1, 20), None, &src);
        assert_eq!(r.branch, Branch::Chou);
        assert_eq!(r.term_date, Some(date(1990, 1, 6)));
    }

    #[test]
    fn month_1990_05_18() {
        let src = SolarTermSource::Approximate;
        let year = year_pillar(date(1990, 5, 18), &src);
        let month = month_pillar(date(1990, 5, 18), year.stem(), None, &src);
        assert_eq!(month.to_string(), "辛巳");
    }

    #[test]
    fn hour_branch_boundaries() {
        assert_eq!(hour_branch(time(23, 0)), Branch::Zi);
        assert_eq!(hour_branch(time(0, 59)), Branch::Zi);
        assert_eq!(hour_branch(time(1, 0)), Branch::Chou);
        assert_eq!(hour_branch(time(2, 59)), Branch::Chou);
        assert_eq!(hour_branch(time(3, 0)), Branch::Yin);
        assert_eq!(hour_branch(time(12, 0)), Branch::Wu);
        assert_eq!(hour_branch(time(22, 59)), Branch::Hai);
    }

    #[test]
    fn rat_hour_wraps_for_every_stem() {
        for s in ALL_STEMS {
            let late = hour_pillar(s, Some(time(23, 0)));
            let early = hour_pillar(s, Some(time(0, 30)));
            assert_eq!(late, early);
            assert_eq!(late.pillar().map(Pillar::branch), Some(Branch::Zi));
        }
    }

    #[test]
    fn jia_day_rat_hour_is_jia_zi() {
        let p = hour_pillar(Stem::Jia, Some(time(23, 30)));
        assert_eq!(p.to_string(), "甲子");
    }

    #[test]
    fn five_rat_origins() {
        let expected = ["甲", "丙", "戊", "庚", "壬", "甲", "丙", "戊", "庚", "壬"];
        for (s, e) in ALL_STEMS.into_iter().zip(expected) {
            assert_eq!(hour_stem_origin(s).name(), e);
        }
        assert_eq!(hour_pillar(Stem::Yi, Some(time(8, 0))).to_string(), "庚辰");
    }

    #[test]
    fn unknown_hour() {
        let p = hour_pillar(Stem::Jia, None);
        assert_eq!(p, HourPillar::Unknown);
        assert_eq!(p.pillar(), None);
        assert_eq!(p.to_string(), UNKNOWN_HOUR_TEXT);
    }
}
