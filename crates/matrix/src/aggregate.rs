//! Per-node threat counts over a filtered collection.
//!
//! One pass over the threats builds an id-keyed direct-count map; roll-ups
//! are derived from it on demand. Threats whose `technique_id` does not
//! resolve contribute to no count, only to the `unresolved` diagnostic, so
//! one bad record never poisons the rest of the pass.

use std::collections::HashMap;

use tracing::warn;

use crate::hierarchy::{HierarchyIndex, ResolvedLevel};
use crate::types::{Technique, Threat};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatCounts {
    direct: HashMap<String, u32>,
    /// Threats excluded because their `technique_id` resolved to nothing
    /// (or to a tactic, which is not a valid mapping target).
    pub unresolved: u32,
}

impl ThreatCounts {
    pub fn tally(threats: &[Threat], index: &HierarchyIndex) -> Self {
        let mut counts = Self::default();
        for threat in threats {
            match index.resolve(&threat.technique_id) {
                Some(resolved) if resolved.level != ResolvedLevel::Tactic => {
                    *counts.direct.entry(threat.technique_id.clone()).or_insert(0) += 1;
                }
                _ => counts.unresolved += 1,
            }
        }
        if counts.unresolved > 0 {
            warn!(
                unresolved = counts.unresolved,
                "threats with unresolvable technique references excluded from aggregation"
            );
        }
        counts
    }

    /// Threats mapped to exactly this id. No roll-up.
    pub fn direct_count(&self, id: &str) -> u32 {
        self.direct.get(id).copied().unwrap_or(0)
    }

    /// Sum of direct counts across a technique's subtechniques.
    pub fn in_subtechniques(&self, technique: &Technique) -> u32 {
        technique
            .subtechniques
            .iter()
            .map(|sub| self.direct_count(&sub.id))
            .sum()
    }

    /// Direct count plus subtechnique counts, the figure shown on a
    /// collapsed technique card.
    pub fn rolled_up_count(&self, technique: &Technique) -> u32 {
        self.direct_count(&technique.id) + self.in_subtechniques(technique)
    }

    /// Total threats that landed in some count.
    pub fn total(&self) -> u32 {
        self.direct.values().sum()
    }
}
