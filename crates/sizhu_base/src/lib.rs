//! Calendrical engine for the four pillars (四柱).
//!
//! This crate provides:
//! - Stems, branches and the 60-pillar sexagenary cycle
//! - Combination/opposition rule tables
//! - Solar-term boundaries (approximate table or astronomical computation)
//! - Year, month, day and hour pillar calculators
//!
//! Everything here is a pure function of its inputs and the constant tables.

pub mod error;
pub mod ganzhi;
pub mod pillars;
pub mod relations;
pub mod solar_term;
pub mod sun;

pub use error::{GanzhiError, SolarTermError};
pub use ganzhi::{
    ALL_BRANCHES, ALL_STEMS, Branch, Pillar, SEXAGENARY_CYCLE, Stem, StemBranch, cycle_index,
    cycle_index_of, pillar_at,
};
pub use pillars::{
    DAY_ANCHOR_INDEX, DAY_ANCHOR_JDN, DAY_ANCHOR_YMD, DAY_ROLLOVER_HOUR, HourPillar,
    MonthResolution, UNKNOWN_HOUR_TEXT, YEAR_EPOCH, YearResolution, day_pillar, effective_year,
    hour_branch, hour_pillar, hour_stem_origin, month_branch, month_pillar,
    month_pillar_from_branch, month_stem_origin, pillar_for_year, resolve_month_branch,
    resolve_year, year_pillar,
};
pub use relations::{
    branch_combination, branch_opposition, favorable_pairs, stem_combination, stem_opposition,
    unfavorable_pairs,
};
pub use solar_term::{
    ALL_MAJOR_TERMS, ApproximateTerms, BoundarySource, MajorTerm, MajorTerms, Resolved,
    SolarTermProvider, SolarTermSource,
};
pub use sun::{AstronomicalTerms, CHINA_STANDARD_OFFSET_MINUTES, sun_apparent_longitude_deg};
