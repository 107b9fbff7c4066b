//! Year lookup: which Gregorian years carry a given year pillar.

use std::ops::RangeInclusive;

use sizhu_base::{Pillar, StemBranch, YEAR_EPOCH, pillar_for_year};

/// Default lookup window.
pub const DEFAULT_YEAR_RANGE: RangeInclusive<i32> = 1900..=2100;

/// Year ↔ year-pillar mapping over an inclusive year range.
///
/// A year's pillar is its offset from 1984 (甲子) taken modulo 60.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearMap {
    start: i32,
    end: i32,
}

impl Default for YearMap {
    fn default() -> Self {
        Self::new(*DEFAULT_YEAR_RANGE.start(), *DEFAULT_YEAR_RANGE.end())
    }
}

impl YearMap {
    /// Map covering `start..=end`; an inverted range is empty.
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Pillar of `year`, or `None` outside the range.
    pub fn pillar_for(&self, year: i32) -> Option<Pillar> {
        self.range().contains(&year).then(|| pillar_for_year(year))
    }

    /// Years in range whose pillar is `pillar`, ascending.
    pub fn years_for(&self, pillar: Pillar) -> Vec<i32> {
        if self.start > self.end {
            return Vec::new();
        }
        let target = i32::from(pillar.index());
        let first_offset = (target - (self.start - YEAR_EPOCH)).rem_euclid(60);
        (self.start + first_offset..=self.end).step_by(60).collect()
    }

    /// Like [`years_for`](Self::years_for); a mixed-parity pair never occurs.
    pub fn years_for_pair(&self, pair: StemBranch) -> Vec<i32> {
        pair.to_pillar()
            .map(|p| self.years_for(p))
            .unwrap_or_default()
    }
}

/// One matching year, flagged when it has not yet passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMatch {
    pub year: i32,
    pub is_upcoming: bool,
}

/// A pair and the years in range that carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearProjection {
    pub pillar: StemBranch,
    pub years: Vec<YearMatch>,
}

/// Project each pair onto the years `start..=end`; `is_upcoming` is
/// `year >= current_year`. Output order follows `pillars`.
pub fn project(
    pillars: &[StemBranch],
    start: i32,
    end: i32,
    current_year: i32,
) -> Vec<YearProjection> {
    let map = YearMap::new(start, end);
    pillars
        .iter()
        .map(|&pillar| YearProjection {
            pillar,
            years: map
                .years_for_pair(pillar)
                .into_iter()
                .map(|year| YearMatch {
                    year,
                    is_upcoming: year >= current_year,
                })
                .collect(),
        })
        .collect()
}

/// [`project`] over pillar text. Strings that are not a stem followed by a
/// branch are skipped.
pub fn project_text<S: AsRef<str>>(
    pillars: &[S],
    start: i32,
    end: i32,
    current_year: i32,
) -> Vec<YearProjection> {
    let parsed: Vec<StemBranch> = pillars
        .iter()
        .filter_map(|s| s.as_ref().parse().ok())
        .collect();
    project(&parsed, start, end, current_year)
}
