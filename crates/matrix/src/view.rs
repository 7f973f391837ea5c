//! Precomputed view models for the matrix renderer.
//!
//! Everything the card components need is derived here in one pass: direct
//! and rolled-up counts, heat colors, and the mapped flag. A technique cell
//! carries both figures so the renderer can flip between collapsed and
//! expanded display without recomputation; `flat_view` only changes layout,
//! never the numbers.

use serde::Serialize;

use crate::aggregate::ThreatCounts;
use crate::filter::FilterState;
use crate::heat::{HeatPalette, Rgb};
use crate::types::Tactic;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixView {
    pub tactics: Vec<TacticColumn>,
    pub flat_view: bool,
    /// Data-quality diagnostic carried through from aggregation.
    pub unresolved: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TacticColumn {
    pub id: String,
    pub name: String,
    pub techniques: Vec<TechniqueCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechniqueCell {
    pub id: String,
    pub name: String,
    pub direct: u32,
    pub in_subtechniques: u32,
    pub total: u32,
    pub color: Rgb,
    pub mapped: bool,
    pub subtechniques: Vec<SubtechniqueCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtechniqueCell {
    pub id: String,
    pub name: String,
    pub direct: u32,
    pub color: Rgb,
    pub mapped: bool,
}

impl MatrixView {
    pub fn build(
        tactics: &[Tactic],
        counts: &ThreatCounts,
        palette: &HeatPalette,
        filters: &FilterState,
    ) -> Self {
        let columns = tactics
            .iter()
            .map(|tactic| TacticColumn {
                id: tactic.id.clone(),
                name: tactic.name.clone(),
                techniques: tactic
                    .techniques
                    .iter()
                    .filter_map(|technique| {
                        let direct = counts.direct_count(&technique.id);
                        let in_subtechniques = counts.in_subtechniques(technique);
                        let total = direct + in_subtechniques;
                        // Mapped-only mode drops unmapped techniques but
                        // keeps the tactic column itself.
                        if filters.show_mapped_only && total == 0 {
                            return None;
                        }
                        Some(TechniqueCell {
                            id: technique.id.clone(),
                            name: technique.name.clone(),
                            direct,
                            in_subtechniques,
                            total,
                            color: palette.color(total),
                            mapped: direct > 0,
                            subtechniques: technique
                                .subtechniques
                                .iter()
                                .map(|sub| {
                                    let direct = counts.direct_count(&sub.id);
                                    SubtechniqueCell {
                                        id: sub.id.clone(),
                                        name: sub.name.clone(),
                                        direct,
                                        color: palette.color(direct),
                                        mapped: direct > 0,
                                    }
                                })
                                .collect(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            tactics: columns,
            flat_view: filters.flat_view,
            unresolved: counts.unresolved,
        }
    }
}
