//! Pillar combination analyzer.
//!
//! Every present pillar contributes a double combination and its
//! advance-one neighbour to the favorable list, and (when its stem has an
//! opposition partner) a double opposition and its retreat-one neighbour to
//! the unfavorable list. Both lists keep first-occurrence order.

use std::collections::HashSet;

use sizhu_base::{Pillar, StemBranch, favorable_pairs, unfavorable_pairs};

use crate::chart_types::FourPillars;

/// Favorable and unfavorable pairs implied by a set of pillars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffinityConflictResult {
    pub favorable: Vec<StemBranch>,
    pub unfavorable: Vec<StemBranch>,
}

impl AffinityConflictResult {
    pub fn is_empty(&self) -> bool {
        self.favorable.is_empty() && self.unfavorable.is_empty()
    }
}

/// Pairs contributed by one pillar, before de-duplication.
pub fn affinity_for(pillar: Pillar) -> AffinityConflictResult {
    let (stem, branch) = (pillar.stem(), pillar.branch());
    AffinityConflictResult {
        favorable: favorable_pairs(stem, branch).to_vec(),
        unfavorable: unfavorable_pairs(stem, branch)
            .map(|pairs| pairs.to_vec())
            .unwrap_or_default(),
    }
}

/// Analyze pillars in the given order.
pub fn analyze_pillars(pillars: &[Pillar]) -> AffinityConflictResult {
    let mut out = AffinityConflictResult::default();
    let mut seen_favorable = HashSet::new();
    let mut seen_unfavorable = HashSet::new();
    for &pillar in pillars {
        let one = affinity_for(pillar);
        for pair in one.favorable {
            if seen_favorable.insert(pair) {
                out.favorable.push(pair);
            }
        }
        for pair in one.unfavorable {
            if seen_unfavorable.insert(pair) {
                out.unfavorable.push(pair);
            }
        }
    }
    out
}

/// Analyze a chart in year → month → day → hour order. An unknown hour
/// contributes nothing.
pub fn analyze(pillars: &FourPillars) -> AffinityConflictResult {
    analyze_pillars(&pillars.present())
}
