//! In-memory person repository
//!
//! Holds the current dataset for a session. Index-based access is
//! bounds-checked and fails fast; it never clamps or silently no-ops.
//! The repository exports back to the same delimited format the importer
//! reads, so a save/load cycle round-trips the dataset.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::import::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
use crate::models::Person;

#[derive(Debug, Default)]
pub struct PersonRepository {
    persons: Vec<Person>,
}

impl PersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole dataset
    pub fn set_persons(&mut self, persons: Vec<Person>) {
        self.persons = persons;
    }

    pub fn all(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Person> {
        self.persons.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.persons.len(),
        })
    }

    pub fn add(&mut self, person: Person) {
        self.persons.push(person);
    }

    /// Replace the person at `index`; the old value is discarded
    pub fn update(&mut self, index: usize, person: Person) -> Result<()> {
        let len = self.persons.len();
        let slot = self
            .persons
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })?;
        *slot = person;
        Ok(())
    }

    /// Remove and return the person at `index`
    pub fn remove(&mut self, index: usize) -> Result<Person> {
        if index >= self.persons.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.persons.len(),
            });
        }
        Ok(self.persons.remove(index))
    }

    /// Export the dataset to a CSV file in the importer's column order
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_csv(file)?;
        debug!(path = %path.display(), count = self.persons.len(), "Saved dataset");
        Ok(())
    }

    /// Write the dataset as CSV to any writer
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);

        let header: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .chain(OPTIONAL_COLUMNS.iter())
            .copied()
            .collect();
        wtr.write_record(&header)?;

        for person in &self.persons {
            let record = [
                person.id.clone(),
                // absent numerics round-trip as 0
                person.graduation_year.unwrap_or(0).to_string(),
                enum_cell(person.region.map(|v| v.as_str())),
                enum_cell(person.primary_os.map(|v| v.as_str())),
                enum_cell(person.engineering_focus.map(|v| v.as_str())),
                enum_cell(person.study_time.map(|v| v.as_str())),
                person.course_load.unwrap_or(0).to_string(),
                join_hyphen(&person.favorite_colors),
                join_hyphen(&person.hobbies),
                join_hyphen(&person.languages),
            ];
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Join a value set with hyphens, matching the dataset cell format
fn join_hyphen(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join("-")
}

/// Render an absent category as an empty cell
fn enum_cell(value: Option<&'static str>) -> String {
    value.unwrap_or("").to_string()
}
