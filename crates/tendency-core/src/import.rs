//! CSV import for person datasets
//!
//! The header row must carry the seven required columns; the three
//! multi-valued columns are optional. Individual rows are parsed leniently:
//! short rows are skipped, unparseable numbers and unrecognized category
//! text become absent attributes. A missing required column fails the whole
//! load - no partial dataset is ever returned.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Person, PersonBuilder};

/// Columns every dataset must declare
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "id",
    "graduationYear",
    "region",
    "primaryOS",
    "engineeringFocus",
    "studyTime",
    "courseLoad",
];

/// Optional multi-valued columns, hyphen-separated within a cell
pub const OPTIONAL_COLUMNS: [&str; 3] = ["favoriteColors", "hobbies", "languages"];

/// Load a dataset from a CSV file
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Person>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::Import(format!("Could not open CSV file {}: {}", path.display(), e)))?;
    parse_csv(file)
}

/// Parse a person dataset from any reader
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut persons = Vec::new();
    let mut skipped = 0usize;

    for row in rdr.records() {
        let record = row?;
        // short rows are individually malformed, not fatal
        if record.len() < headers.len() {
            skipped += 1;
            continue;
        }
        persons.push(columns.person_from_record(&record));
    }

    if skipped > 0 {
        debug!(skipped, "Skipped malformed CSV rows");
    }
    debug!(count = persons.len(), "Parsed person dataset");
    Ok(persons)
}

/// Resolved column positions for one dataset
struct ColumnMap {
    id: usize,
    graduation_year: usize,
    region: usize,
    primary_os: usize,
    engineering_focus: usize,
    study_time: usize,
    course_load: usize,
    favorite_colors: Option<usize>,
    hobbies: Option<usize>,
    languages: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index_of = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            index_of(name)
                .ok_or_else(|| Error::Import(format!("CSV missing required column: {}", name)))
        };

        Ok(Self {
            id: required("id")?,
            graduation_year: required("graduationYear")?,
            region: required("region")?,
            primary_os: required("primaryOS")?,
            engineering_focus: required("engineeringFocus")?,
            study_time: required("studyTime")?,
            course_load: required("courseLoad")?,
            favorite_colors: index_of("favoriteColors"),
            hobbies: index_of("hobbies"),
            languages: index_of("languages"),
        })
    }

    fn person_from_record(&self, record: &StringRecord) -> Person {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let opt_cell = |idx: Option<usize>| idx.map(cell).unwrap_or("");

        PersonBuilder::new()
            .id(cell(self.id))
            .graduation_year(parse_number(cell(self.graduation_year)))
            .region_str(cell(self.region))
            .primary_os_str(cell(self.primary_os))
            .engineering_focus_str(cell(self.engineering_focus))
            .study_time_str(cell(self.study_time))
            .course_load(parse_number(cell(self.course_load)))
            .favorite_colors(split_hyphen(opt_cell(self.favorite_colors)))
            .hobbies(split_hyphen(opt_cell(self.hobbies)))
            .languages(split_hyphen(opt_cell(self.languages)))
            .build()
    }
}

/// Unparseable numerics become the absent sentinel, not a row failure
fn parse_number(s: &str) -> i32 {
    s.trim().parse().unwrap_or(0)
}

/// Split a hyphen-separated cell, trimming tokens and dropping empties
pub(crate) fn split_hyphen(raw: &str) -> BTreeSet<String> {
    raw.split('-')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
