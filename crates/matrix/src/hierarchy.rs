//! Precomputed id lookups over the tactic forest.
//!
//! The forest is depth exactly three (tactic -> technique -> subtechnique)
//! and ids are unique across all levels. A single traversal at build time
//! replaces the nested-loop searches a naive consumer would run per threat,
//! so every later `resolve` is a plain map hit.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::types::Tactic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { id: String },
    TacticMismatch { technique_id: String, tactic_id: String },
    ParentMismatch { subtechnique_id: String, parent_technique_id: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "duplicate id in hierarchy: {}", id),
            Self::TacticMismatch {
                technique_id,
                tactic_id,
            } => write!(
                f,
                "technique {} names tactic {} but is not nested under it",
                technique_id, tactic_id
            ),
            Self::ParentMismatch {
                subtechnique_id,
                parent_technique_id,
            } => write!(
                f,
                "subtechnique {} names parent technique {} but is not nested under it",
                subtechnique_id, parent_technique_id
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedLevel {
    Tactic,
    Technique,
    Subtechnique,
}

/// Identity of one node as seen from a lookup: id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: String,
    pub name: String,
}

/// Tagged result of an id lookup. The tag says which level the id itself
/// lives at; the chain above it is always populated (a subtechnique result
/// carries its technique and tactic, a technique result its tactic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub level: ResolvedLevel,
    pub tactic: NodeRef,
    pub technique: Option<NodeRef>,
    pub subtechnique: Option<NodeRef>,
}

impl Resolved {
    /// Display path from tactic down to the resolved node.
    pub fn breadcrumb(&self) -> String {
        let mut path = self.tactic.name.clone();
        if let Some(technique) = &self.technique {
            path.push_str(" / ");
            path.push_str(&technique.name);
        }
        if let Some(subtechnique) = &self.subtechnique {
            path.push_str(" / ");
            path.push_str(&subtechnique.name);
        }
        path
    }
}

/// Build-once, read-many index over one hierarchy snapshot. Rebuilding is
/// the only way to reflect hierarchy changes.
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    nodes: HashMap<String, Resolved>,
    under_tactic: HashMap<String, HashSet<String>>,
}

impl HierarchyIndex {
    pub fn build(tactics: &[Tactic]) -> Result<Self, ValidationError> {
        let mut nodes: HashMap<String, Resolved> = HashMap::new();
        let mut under_tactic: HashMap<String, HashSet<String>> = HashMap::new();

        let mut insert = |id: &str, resolved: Resolved| -> Result<(), ValidationError> {
            if nodes.insert(id.to_owned(), resolved).is_some() {
                return Err(ValidationError::DuplicateId { id: id.to_owned() });
            }
            Ok(())
        };

        for tactic in tactics {
            let tactic_ref = NodeRef {
                id: tactic.id.clone(),
                name: tactic.name.clone(),
            };
            insert(
                &tactic.id,
                Resolved {
                    level: ResolvedLevel::Tactic,
                    tactic: tactic_ref.clone(),
                    technique: None,
                    subtechnique: None,
                },
            )?;
            let scoped = under_tactic.entry(tactic.id.clone()).or_default();

            for technique in &tactic.techniques {
                if technique.tactic_id != tactic.id {
                    return Err(ValidationError::TacticMismatch {
                        technique_id: technique.id.clone(),
                        tactic_id: technique.tactic_id.clone(),
                    });
                }
                let technique_ref = NodeRef {
                    id: technique.id.clone(),
                    name: technique.name.clone(),
                };
                insert(
                    &technique.id,
                    Resolved {
                        level: ResolvedLevel::Technique,
                        tactic: tactic_ref.clone(),
                        technique: Some(technique_ref.clone()),
                        subtechnique: None,
                    },
                )?;
                scoped.insert(technique.id.clone());

                for subtechnique in &technique.subtechniques {
                    if subtechnique.parent_technique_id != technique.id {
                        return Err(ValidationError::ParentMismatch {
                            subtechnique_id: subtechnique.id.clone(),
                            parent_technique_id: subtechnique.parent_technique_id.clone(),
                        });
                    }
                    insert(
                        &subtechnique.id,
                        Resolved {
                            level: ResolvedLevel::Subtechnique,
                            tactic: tactic_ref.clone(),
                            technique: Some(technique_ref.clone()),
                            subtechnique: Some(NodeRef {
                                id: subtechnique.id.clone(),
                                name: subtechnique.name.clone(),
                            }),
                        },
                    )?;
                    scoped.insert(subtechnique.id.clone());
                }
            }
        }

        Ok(Self {
            nodes,
            under_tactic,
        })
    }

    /// O(1) lookup of any id at any level. `None` means the id is not part
    /// of this hierarchy snapshot.
    pub fn resolve(&self, id: &str) -> Option<&Resolved> {
        self.nodes.get(id)
    }

    /// All technique and subtechnique ids nested under one tactic.
    pub fn technique_ids_under(&self, tactic_id: &str) -> Option<&HashSet<String>> {
        self.under_tactic.get(tactic_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
