//! Suppression and retention store
//!
//! Keeps the user's verdicts across runs: a blocklist of insight keys that
//! must never resurface, and an append-only list of insights retained as
//! useful. Both live in plain files so the store survives restarts; a
//! missing file simply means no prior state.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

use crate::error::Result;
use crate::insights::Insight;

#[derive(Debug, Default)]
pub struct InsightStore {
    useful: Vec<Insight>,
    blocked: BTreeSet<String>,
}

impl InsightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load retained insights from a CSV file
    /// (`key,description,score,support,population`, no header row).
    ///
    /// A missing file leaves the store empty; malformed rows are skipped.
    pub fn load_useful(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.useful = read_insight_rows(path)?;
        debug!(count = self.useful.len(), "Loaded retained insights");
        Ok(())
    }

    /// Load blocked keys from a text file, one key per line
    pub fn load_blocked(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.blocked.clear();
        let path = path.as_ref();
        if !path.exists() {
            return Ok(());
        }

        for line in fs::read_to_string(path)?.lines() {
            let key = line.trim();
            if !key.is_empty() {
                self.blocked.insert(key.to_string());
            }
        }

        debug!(count = self.blocked.len(), "Loaded blocked keys");
        Ok(())
    }

    /// Retain insights: append rows to the CSV file and extend the
    /// in-memory list. Existing rows are never rewritten.
    pub fn save_useful(&mut self, insights: &[Insight], path: impl AsRef<Path>) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        for insight in insights {
            writer.serialize(insight)?;
        }
        writer.flush()?;

        self.useful.extend(insights.iter().cloned());
        Ok(())
    }

    /// Rewrite the blocklist file, one key per line in sorted order
    pub fn save_blocked(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut content = String::new();
        for key in &self.blocked {
            content.push_str(key);
            content.push('\n');
        }
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Insert a key into the blocklist (idempotent)
    pub fn add_blocked_key(&mut self, key: impl Into<String>) {
        self.blocked.insert(key.into());
    }

    /// Remove a key from the blocklist; returns whether it was present
    pub fn remove_blocked_key(&mut self, key: &str) -> bool {
        self.blocked.remove(key)
    }

    pub fn is_blocked(&self, key: &str) -> bool {
        self.blocked.contains(key)
    }

    pub fn blocked_keys(&self) -> &BTreeSet<String> {
        &self.blocked
    }

    /// Drop insights whose key is blocked
    pub fn filter_blocked(&self, insights: Vec<Insight>) -> Vec<Insight> {
        insights
            .into_iter()
            .filter(|insight| !self.is_blocked(&insight.key))
            .collect()
    }

    /// Retained insights, oldest first
    pub fn useful(&self) -> &[Insight] {
        &self.useful
    }
}

/// Read headerless insight rows from a CSV file.
///
/// A missing file yields an empty list; malformed rows are skipped with a
/// warning rather than failing the load.
pub fn read_insight_rows(path: impl AsRef<Path>) -> Result<Vec<Insight>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize::<Insight>() {
        match row {
            Ok(insight) => rows.push(insight),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping malformed insight row"),
        }
    }
    Ok(rows)
}

/// Rewrite a headerless insight CSV file with exactly `insights`
pub fn write_insight_rows(path: impl AsRef<Path>, insights: &[Insight]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    for insight in insights {
        writer.serialize(insight)?;
    }
    writer.flush()?;
    Ok(())
}
