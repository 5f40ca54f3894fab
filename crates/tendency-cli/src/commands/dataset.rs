//! Dataset commands: load, fetch, save, people management

use std::path::Path;

use anyhow::{bail, Context, Result};

use tendency_core::{remote, PersonBuilder};

use crate::cli::PersonFields;
use crate::state::AppState;

/// Sample dataset used when `fetch` is called without a URL
pub const DEFAULT_PEOPLE_URL: &str =
    "http://gist.githubusercontent.com/esolovey-bu/cba6c1b4eedd0a621ce879e6e6299d28/raw/sample_people.json?v=2";

pub fn cmd_load(state: &mut AppState, file: &Path) -> Result<()> {
    let count = state
        .load_dataset(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    println!("Loaded {} people.", count);
    Ok(())
}

pub fn cmd_fetch(state: &mut AppState, url: Option<&str>) -> Result<()> {
    let url = url.unwrap_or(DEFAULT_PEOPLE_URL);
    println!("Fetching people from {}", url);

    let persons = remote::fetch_people(url).context("Failed to load people from URL")?;
    if persons.is_empty() {
        println!("No people found in document.");
        return Ok(());
    }

    println!("Loaded {} people from JSON.", persons.len());
    state.set_fetched(persons);
    let path = state.persist_people()?;
    println!("Session dataset saved to: {}", path.display());
    Ok(())
}

pub fn cmd_save(state: &AppState) -> Result<()> {
    if state.repo.is_empty() {
        bail!("No data to save. Load a dataset first.");
    }
    let path = state.save_dataset()?;
    println!("Dataset saved to: {}", path.display());
    Ok(())
}

pub fn cmd_save_as(state: &mut AppState, file: &Path) -> Result<()> {
    if state.repo.is_empty() {
        bail!("No data to save. Load a dataset first.");
    }
    state.save_dataset_as(file)?;
    println!("Dataset saved to: {}", file.display());
    Ok(())
}

pub fn cmd_people_list(state: &AppState) -> Result<()> {
    if state.repo.is_empty() {
        println!("No people loaded.");
        return Ok(());
    }
    for (i, person) in state.repo.all().iter().enumerate() {
        println!("{}) {}", i, person.summary());
    }
    Ok(())
}

pub fn cmd_people_add(state: &mut AppState, id: &str, fields: &PersonFields) -> Result<()> {
    let builder = apply_fields(PersonBuilder::new().id(id), fields);
    state.repo.add(builder.build());
    let path = state.persist_people()?;

    println!("Person added! Total: {} people.", state.repo.len());
    println!("Dataset saved to: {}", path.display());
    Ok(())
}

pub fn cmd_people_edit(
    state: &mut AppState,
    index: usize,
    id: Option<&str>,
    fields: &PersonFields,
) -> Result<()> {
    let current = state.repo.get(index)?;

    let mut builder = PersonBuilder::from_person(current);
    if let Some(id) = id {
        builder = builder.id(id);
    }
    builder = apply_fields(builder, fields);
    state.repo.update(index, builder.build())?;
    let path = state.persist_people()?;

    println!("Person updated!");
    println!("Dataset saved to: {}", path.display());
    Ok(())
}

pub fn cmd_people_remove(state: &mut AppState, index: usize) -> Result<()> {
    let removed = state.repo.remove(index)?;
    let path = state.persist_people()?;
    println!("Removed {}. Dataset saved to: {}", removed.id, path.display());
    Ok(())
}

/// Apply the optional attribute flags onto a builder
fn apply_fields(mut builder: PersonBuilder, fields: &PersonFields) -> PersonBuilder {
    if let Some(year) = fields.graduation_year {
        builder = builder.graduation_year(year);
    }
    if let Some(region) = &fields.region {
        builder = builder.region_str(region);
    }
    if let Some(os) = &fields.os {
        builder = builder.primary_os_str(os);
    }
    if let Some(focus) = &fields.focus {
        builder = builder.engineering_focus_str(focus);
    }
    if let Some(study) = &fields.study {
        builder = builder.study_time_str(study);
    }
    if let Some(load) = fields.course_load {
        builder = builder.course_load(load);
    }
    if let Some(colors) = &fields.colors {
        builder = builder.colors_from_str(colors);
    }
    if let Some(hobbies) = &fields.hobbies {
        builder = builder.hobbies_from_str(hobbies);
    }
    if let Some(languages) = &fields.languages {
        builder = builder.languages_from_str(languages);
    }
    builder
}
