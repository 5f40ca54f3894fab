//! Insight mining: pairwise attribute correlation over a person dataset
//!
//! - [`types`]: the [`Insight`] value itself
//! - [`engine`]: cohort aggregation, mode seeking, scoring, thresholds
//! - [`matrix`]: all-pairs average-score aggregation for the heat map

pub mod engine;
pub mod matrix;
pub mod types;

pub use engine::{BuiltinPair, InsightEngine};
pub use matrix::{CorrelationMatrix, PairSummary, Strength};
pub use types::Insight;
