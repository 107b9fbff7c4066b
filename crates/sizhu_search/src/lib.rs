//! Chart derivation and pillar analysis.
//!
//! This crate provides:
//! - Four-pillar derivation from a civil or lunar birth moment, with
//!   boundary provenance and reference-chart comparison
//! - Validation of manually entered pillars
//! - Favorable/unfavorable pair analysis
//! - Year lookup for pillars over a year range

pub mod affinity;
pub mod chart;
pub mod chart_types;
pub mod error;
pub mod lunar;
pub mod manual;
pub mod projection;

pub use affinity::{AffinityConflictResult, affinity_for, analyze, analyze_pillars};
pub use chart::{
    compare_with_reference, derive_chart, derive_chart_from_parts, derive_chart_with_reference,
};
pub use chart_types::{
    ChartConfig, Discrepancy, FourPillarChart, FourPillars, HourPolicy, HourSource, PillarField,
    Provenance, ReferencePillars,
};
pub use error::{ChartError, ConversionError};
pub use lunar::{LunarDate, LunarToSolarConverter, derive_chart_from_lunar};
pub use manual::{ManualEntry, UNKNOWN_HOUR_MARKERS, parse_manual_pillars};
pub use projection::{
    DEFAULT_YEAR_RANGE, YearMap, YearMatch, YearProjection, project, project_text,
};
