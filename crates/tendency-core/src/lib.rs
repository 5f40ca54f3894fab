//! Tendency Core Library
//!
//! Shared functionality for the Tendency attribute-correlation miner:
//! - Person records and the nine minable attributes
//! - CSV import and JSON-over-HTTP ingestion
//! - The insight mining engine (cohort aggregation, scoring, thresholds)
//! - All-pairs correlation matrix for ranking and heat-map views
//! - Suppression/retention store persisted across runs
//! - In-memory person repository with delimited export

pub mod attributes;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod remote;
pub mod repository;
pub mod store;

pub use attributes::Attribute;
pub use config::{MiningConfig, PairThresholds};
pub use error::{Error, Result};
pub use insights::{BuiltinPair, CorrelationMatrix, Insight, InsightEngine, PairSummary, Strength};
pub use models::{EngineeringFocus, Person, PersonBuilder, PrimaryOs, Region, StudyTime};
pub use repository::PersonRepository;
pub use store::InsightStore;
