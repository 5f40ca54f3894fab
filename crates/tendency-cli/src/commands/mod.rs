//! Command implementations

mod dataset;
mod discover;
mod insights;

pub use dataset::*;
pub use discover::*;
pub use insights::*;
