use serde::{Deserialize, Serialize};

pub const SEVERITIES: [ThreatSeverity; 4] = [
    ThreatSeverity::Critical,
    ThreatSeverity::High,
    ThreatSeverity::Medium,
    ThreatSeverity::Low,
];

pub const STATUSES: [ThreatStatus; 5] = [
    ThreatStatus::Detected,
    ThreatStatus::Investigating,
    ThreatStatus::Contained,
    ThreatStatus::Remediated,
    ThreatStatus::Blocked,
];

pub const TIME_RANGES: [TimeRange; 4] = [
    TimeRange::H24,
    TimeRange::D7,
    TimeRange::D30,
    TimeRange::All,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ThreatSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatStatus {
    Detected,
    Investigating,
    Contained,
    Remediated,
    Blocked,
}

impl ThreatStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Detected => "Detected",
            Self::Investigating => "Investigating",
            Self::Contained => "Contained",
            Self::Remediated => "Remediated",
            Self::Blocked => "Blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    H24,
    #[serde(rename = "7d")]
    D7,
    #[serde(rename = "30d")]
    D30,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H24 => "24h",
            Self::D7 => "7d",
            Self::D30 => "30d",
            Self::All => "all",
        }
    }

    /// Window length in seconds, or `None` for the unbounded range.
    pub fn window_secs(self) -> Option<i64> {
        match self {
            Self::H24 => Some(24 * 3600),
            Self::D7 => Some(7 * 24 * 3600),
            Self::D30 => Some(30 * 24 * 3600),
            Self::All => None,
        }
    }
}

/// Top-level kill-chain stage. Root of the static hierarchy; immutable
/// after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tactic {
    pub id: String,
    pub name: String,
    pub description: String,
    pub techniques: Vec<Technique>,
}

/// A method of achieving a tactic's goal. `tactic_id` is a non-owning
/// back-reference and must name the tactic this technique is nested under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technique {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tactic_id: String,
    pub subtechniques: Vec<Subtechnique>,
}

/// Specialization of a technique. Leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtechnique {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parent_technique_id: String,
}

/// An observed security event mapped onto the hierarchy. `technique_id`
/// may name either a technique or a subtechnique; consumers resolve it
/// through the [`crate::HierarchyIndex`] rather than guessing from shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub id: String,
    pub technique_id: String,
    /// Unix timestamp (seconds) of the observation.
    pub ts_unix: i64,
    pub severity: ThreatSeverity,
    pub status: ThreatStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Deserialize a tactic forest from its JSON feed form. Validation against
/// the hierarchy invariants happens in [`crate::HierarchyIndex::build`],
/// not here.
pub fn tactics_from_json(data: &str) -> Result<Vec<Tactic>, serde_json::Error> {
    serde_json::from_str(data)
}

/// Deserialize a threat collection from its JSON feed form.
pub fn threats_from_json(data: &str) -> Result<Vec<Threat>, serde_json::Error> {
    serde_json::from_str(data)
}
