//! ATT&CK threat matrix engine.
//!
//! Pure, synchronous core behind the threat dashboard: an id index over the
//! tactic/technique/subtechnique forest, a composable visibility predicate
//! over threat records, bottom-up count aggregation, and the deterministic
//! count-to-color heat mapping. The engine performs **no I/O** -- it
//! evaluates immutable snapshots supplied by the caller and produces view
//! models for the rendering layer.

mod aggregate;
mod filter;
mod heat;
mod hierarchy;
mod types;
mod view;

pub use aggregate::ThreatCounts;
pub use filter::{apply, passes, FilterState};
pub use heat::{HeatPalette, LegendBucket, Rgb, DEFAULT_MAX_THREATS};
pub use hierarchy::{HierarchyIndex, NodeRef, Resolved, ResolvedLevel, ValidationError};
pub use types::{
    tactics_from_json, threats_from_json, Subtechnique, Tactic, Technique, Threat, ThreatSeverity,
    ThreatStatus, TimeRange, SEVERITIES, STATUSES, TIME_RANGES,
};
pub use view::{MatrixView, SubtechniqueCell, TacticColumn, TechniqueCell};
