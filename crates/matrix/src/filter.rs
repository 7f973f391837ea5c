//! Filter state and the per-threat visibility predicate.
//!
//! `FilterState` is an immutable value: every transition returns a new
//! state, so callers can memoize on equality instead of tracking mutation.
//! The predicate itself is pure and takes an explicit `now` so time-window
//! checks stay reproducible.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hierarchy::{HierarchyIndex, ResolvedLevel};
use crate::types::{Threat, ThreatSeverity, ThreatStatus, TimeRange, SEVERITIES, STATUSES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub time_range: TimeRange,
    /// Membership filter: an empty set shows nothing, not everything.
    pub severities: HashSet<ThreatSeverity>,
    /// Membership filter, same empty-set semantics as `severities`.
    pub statuses: HashSet<ThreatStatus>,
    /// Allow-list of tactic ids. Empty means no tactic restriction, which
    /// is deliberately asymmetric with the two membership filters above.
    pub tactics: HashSet<String>,
    pub show_mapped_only: bool,
    pub flat_view: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            time_range: TimeRange::D7,
            severities: SEVERITIES.into_iter().collect(),
            statuses: STATUSES.into_iter().collect(),
            tactics: HashSet::new(),
            show_mapped_only: false,
            flat_view: false,
        }
    }
}

impl FilterState {
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_severities(mut self, severities: HashSet<ThreatSeverity>) -> Self {
        self.severities = severities;
        self
    }

    pub fn with_statuses(mut self, statuses: HashSet<ThreatStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_tactics(mut self, tactics: HashSet<String>) -> Self {
        self.tactics = tactics;
        self
    }

    pub fn with_show_mapped_only(mut self, show: bool) -> Self {
        self.show_mapped_only = show;
        self
    }

    pub fn with_flat_view(mut self, flat: bool) -> Self {
        self.flat_view = flat;
        self
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }
}

/// Decide whether one threat is visible under one filter snapshot.
///
/// Dimensions short-circuit in the order time range, severity, status,
/// tactic; the result is the conjunction, so order only affects work done.
/// Time-window boundaries are inclusive: a threat aged exactly the window
/// length still passes.
pub fn passes(threat: &Threat, filters: &FilterState, index: &HierarchyIndex, now: i64) -> bool {
    if let Some(window) = filters.time_range.window_secs() {
        if now - threat.ts_unix > window {
            return false;
        }
    }

    if !filters.severities.contains(&threat.severity) {
        return false;
    }

    if !filters.statuses.contains(&threat.status) {
        return false;
    }

    if filters.tactics.is_empty() {
        return true;
    }
    match index.resolve(&threat.technique_id) {
        // A tactic id is not a valid threat mapping; treat it like an
        // unresolved reference rather than a match.
        Some(resolved) if resolved.level != ResolvedLevel::Tactic => {
            filters.tactics.contains(&resolved.tactic.id)
        }
        _ => {
            debug!(
                threat = %threat.id,
                technique = %threat.technique_id,
                "unresolved technique reference, excluded by tactic filter"
            );
            false
        }
    }
}

/// Apply the predicate over a whole snapshot, yielding the filtered
/// collection the aggregation pass and the renderer consume.
pub fn apply(
    threats: &[Threat],
    filters: &FilterState,
    index: &HierarchyIndex,
    now: i64,
) -> Vec<Threat> {
    threats
        .iter()
        .filter(|threat| passes(threat, filters, index, now))
        .cloned()
        .collect()
}
