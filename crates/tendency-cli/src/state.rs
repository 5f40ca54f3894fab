//! Session state shared by all commands
//!
//! Holds the person repository and the suppression store, plus the file
//! plumbing that lets a one-shot CLI behave like a session: the data dir
//! remembers the current dataset path, the blocklist, the retained
//! insights, and the last generated listing (so `keep`/`discard` can refer
//! to indexes from the previous `generate`/`pair` run).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use tendency_core::store::{read_insight_rows, write_insight_rows};
use tendency_core::{import, Insight, InsightStore, PersonRepository};

const LAST_DATASET_FILE: &str = "last_dataset.txt";
const SESSION_DATASET_FILE: &str = "dataset.csv";
const LAST_GENERATED_FILE: &str = "last_generated.csv";
const USEFUL_FILE: &str = "useful_insights.csv";
const BLOCKED_FILE: &str = "blocked_keys.txt";

pub struct AppState {
    pub repo: PersonRepository,
    pub store: InsightStore,
    data_dir: PathBuf,
    current_dataset: Option<PathBuf>,
}

impl AppState {
    /// Open the session: resolve the data dir, load prior store state, and
    /// auto-reload the last dataset if one is remembered.
    ///
    /// A missing or unreadable previous dataset is a warning, not an error;
    /// the session just starts empty.
    pub fn open(data_dir_override: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir_override {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir(),
        };
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Could not create data dir {}", data_dir.display()))?;

        let mut store = InsightStore::new();
        store.load_useful(data_dir.join(USEFUL_FILE))?;
        store.load_blocked(data_dir.join(BLOCKED_FILE))?;

        let mut state = Self {
            repo: PersonRepository::new(),
            store,
            data_dir,
            current_dataset: None,
        };

        if let Some(path) = state.read_last_dataset_path() {
            match import::load_csv(&path) {
                Ok(persons) => {
                    debug!(path = %path.display(), count = persons.len(), "Auto-loaded last dataset");
                    state.repo.set_persons(persons);
                    state.current_dataset = Some(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to auto-load last dataset");
                }
            }
        }

        Ok(state)
    }

    pub fn current_dataset(&self) -> Option<&Path> {
        self.current_dataset.as_deref()
    }

    /// Load a CSV dataset and remember its path for the next session
    pub fn load_dataset(&mut self, path: &Path) -> Result<usize> {
        let persons = import::load_csv(path)?;
        let count = persons.len();
        self.repo.set_persons(persons);
        self.current_dataset = Some(path.to_path_buf());
        self.write_last_dataset_path(path);
        Ok(count)
    }

    /// Replace the dataset with remotely fetched people (no local path)
    pub fn set_fetched(&mut self, persons: Vec<tendency_core::Person>) {
        self.repo.set_persons(persons);
        self.current_dataset = None;
    }

    /// Save to the current dataset path, if one is known
    pub fn save_dataset(&self) -> Result<PathBuf> {
        let Some(path) = self.current_dataset.clone() else {
            bail!("No dataset path set. Use 'save-as <file.csv>' first.");
        };
        self.repo.save_csv(&path)?;
        Ok(path)
    }

    /// Write the dataset through to its current file, or to a session file
    /// in the data dir when no path is known yet (fetched datasets, first
    /// add into an empty session). Keeps one-shot invocations coherent:
    /// every dataset change is visible to the next command.
    pub fn persist_people(&mut self) -> Result<PathBuf> {
        let path = self
            .current_dataset
            .clone()
            .unwrap_or_else(|| self.data_dir.join(SESSION_DATASET_FILE));
        self.repo.save_csv(&path)?;
        self.current_dataset = Some(path.clone());
        self.write_last_dataset_path(&path);
        Ok(path)
    }

    /// Save to a new path and make it current
    pub fn save_dataset_as(&mut self, path: &Path) -> Result<()> {
        self.repo.save_csv(path)?;
        self.current_dataset = Some(path.to_path_buf());
        self.write_last_dataset_path(path);
        Ok(())
    }

    /// Persist a freshly generated listing so keep/discard can index into it
    pub fn record_generated(&self, insights: &[Insight]) -> Result<()> {
        write_insight_rows(self.data_dir.join(LAST_GENERATED_FILE), insights)?;
        Ok(())
    }

    /// The listing produced by the most recent generate/pair run
    pub fn last_generated(&self) -> Result<Vec<Insight>> {
        Ok(read_insight_rows(self.data_dir.join(LAST_GENERATED_FILE))?)
    }

    /// Append retained insights to the useful store
    pub fn retain_useful(&mut self, insights: &[Insight]) -> Result<()> {
        self.store
            .save_useful(insights, self.data_dir.join(USEFUL_FILE))?;
        Ok(())
    }

    /// Rewrite the blocklist file from the in-memory set
    pub fn persist_blocked(&self) -> Result<()> {
        self.store.save_blocked(self.data_dir.join(BLOCKED_FILE))?;
        Ok(())
    }

    fn read_last_dataset_path(&self) -> Option<PathBuf> {
        let marker = self.data_dir.join(LAST_DATASET_FILE);
        let content = fs::read_to_string(marker).ok()?;
        let line = content.lines().next()?.trim();
        (!line.is_empty()).then(|| PathBuf::from(line))
    }

    fn write_last_dataset_path(&self, path: &Path) {
        let marker = self.data_dir.join(LAST_DATASET_FILE);
        if let Err(e) = fs::write(&marker, format!("{}\n", path.display())) {
            // losing the marker only costs the auto-load next session
            warn!(path = %marker.display(), error = %e, "Could not remember dataset path");
        }
    }
}

/// Platform data dir (~/.local/share/tendency), falling back to the
/// working directory when the platform offers none.
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tendency"))
        .unwrap_or_else(|| PathBuf::from("."))
}
