//! All-pairs correlation aggregation for ranking and heat-map views
//!
//! Each unordered attribute pair is mined once with the generic generator;
//! the pair's average insight score fills both (i, j) and (j, i) cells.
//! Pairs that produce no insights get no entry at all (rendered as "--",
//! not zero).

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::attributes::Attribute;
use crate::models::Person;

use super::engine::InsightEngine;

/// Three-tier classification of an average pair score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl Strength {
    /// Classify a rounded average score: <50 weak, 50-65 moderate, >65 strong
    pub fn classify(score: u8) -> Self {
        if score > 65 {
            Self::Strong
        } else if score >= 50 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate result for one unordered attribute pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairSummary {
    pub attr_x: Attribute,
    pub attr_y: Attribute,
    /// Number of insights the pair produced (always > 0; empty pairs are dropped)
    pub insight_count: usize,
    /// Mean of the produced insights' scores
    pub avg_score: f64,
}

impl PairSummary {
    /// Rounded score shown in grid cells
    pub fn rounded_score(&self) -> u8 {
        self.avg_score.round().clamp(0.0, 100.0) as u8
    }

    pub fn strength(&self) -> Strength {
        Strength::classify(self.rounded_score())
    }

    /// Proportional bar for the ranking view: one '#' per 5 points (0-20)
    pub fn bar_length(&self) -> usize {
        (self.avg_score / 5.0).round() as usize
    }
}

/// Symmetric attribute-by-attribute average-score lookup
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    attributes: Vec<Attribute>,
    /// Non-empty pairs sorted by average score descending
    ranked: Vec<PairSummary>,
    cells: HashMap<(Attribute, Attribute), f64>,
}

impl CorrelationMatrix {
    /// Mine every unordered pair from `attributes` and aggregate.
    ///
    /// Results are symmetric by construction: each pair is mined once and
    /// its average reused for both cell orientations.
    pub fn build(
        engine: &InsightEngine,
        persons: &[Person],
        blocked: &BTreeSet<String>,
        attributes: &[Attribute],
    ) -> Self {
        let mut ranked = Vec::new();
        let mut cells = HashMap::new();

        for i in 0..attributes.len() {
            for j in (i + 1)..attributes.len() {
                let (attr_x, attr_y) = (attributes[i], attributes[j]);
                let insights = engine.generate_for_pair(persons, blocked, attr_x, attr_y);
                if insights.is_empty() {
                    continue;
                }

                let total: usize = insights.iter().map(|ins| ins.score as usize).sum();
                let avg_score = total as f64 / insights.len() as f64;

                cells.insert((attr_x, attr_y), avg_score);
                cells.insert((attr_y, attr_x), avg_score);
                ranked.push(PairSummary {
                    attr_x,
                    attr_y,
                    insight_count: insights.len(),
                    avg_score,
                });
            }
        }

        // average desc; attribute order keeps equal averages stable
        ranked.sort_by(|a, b| {
            b.avg_score
                .partial_cmp(&a.avg_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| (a.attr_x, a.attr_y).cmp(&(b.attr_x, b.attr_y)))
        });

        debug!(
            attributes = attributes.len(),
            pairs = ranked.len(),
            "Correlation matrix built"
        );

        Self {
            attributes: attributes.to_vec(),
            ranked,
            cells,
        }
    }

    /// Attribute ordering the grid is indexed by
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// All non-empty pairs, strongest first
    pub fn ranked(&self) -> &[PairSummary] {
        &self.ranked
    }

    /// Strongest `n` pairs for the ranking view
    pub fn top(&self, n: usize) -> &[PairSummary] {
        &self.ranked[..self.ranked.len().min(n)]
    }

    /// Symmetric cell lookup; `None` on the diagonal and for empty pairs
    pub fn cell(&self, attr_x: Attribute, attr_y: Attribute) -> Option<f64> {
        if attr_x == attr_y {
            return None;
        }
        self.cells.get(&(attr_x, attr_y)).copied()
    }
}
