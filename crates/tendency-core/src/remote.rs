//! Remote person source: JSON-over-HTTP
//!
//! Fetches a document of the form `{ "people": [ ... ] }` where each entry
//! uses the dataset's camelCase field names and multi-valued fields are
//! hyphen-separated strings (not JSON arrays). The fetch blocks the calling
//! thread for at most [`FETCH_TIMEOUT`] and fails outright on error - no
//! retry, no partial dataset.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::import::split_hyphen;
use crate::models::{Person, PersonBuilder};

/// Bound on how long a remote fetch may block
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level remote document
#[derive(Debug, Deserialize)]
struct PeopleDocument {
    people: Vec<PersonRow>,
}

/// One person entry; every field is defaultable so sparse records load
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersonRow {
    id: String,
    graduation_year: i32,
    region: String,
    #[serde(rename = "primaryOS")]
    primary_os: String,
    engineering_focus: String,
    study_time: String,
    course_load: i32,
    favorite_colors: String,
    hobbies: String,
    languages: String,
}

impl PersonRow {
    fn into_person(self) -> Person {
        PersonBuilder::new()
            .id(self.id)
            .graduation_year(self.graduation_year)
            .region_str(&self.region)
            .primary_os_str(&self.primary_os)
            .engineering_focus_str(&self.engineering_focus)
            .study_time_str(&self.study_time)
            .course_load(self.course_load)
            .favorite_colors(split_hyphen(&self.favorite_colors))
            .hobbies(split_hyphen(&self.hobbies))
            .languages(split_hyphen(&self.languages))
            .build()
    }
}

/// Fetch and parse a person dataset from a URL
pub fn fetch_people(url: &str) -> Result<Vec<Person>> {
    info!(url, "Fetching people document");

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;

    parse_people_json(&body)
}

/// Parse a people document from a JSON string
pub fn parse_people_json(json: &str) -> Result<Vec<Person>> {
    let document: PeopleDocument = serde_json::from_str(json)?;
    let persons: Vec<Person> = document
        .people
        .into_iter()
        .map(PersonRow::into_person)
        .collect();

    debug!(count = persons.len(), "Parsed people document");
    Ok(persons)
}
