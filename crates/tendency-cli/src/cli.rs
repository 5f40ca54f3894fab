//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tendency - mine attribute correlations from people datasets
#[derive(Parser)]
#[command(name = "tendency")]
#[command(about = "Mine pairwise attribute correlations from people datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory for session state (dataset path, blocked keys,
    /// retained insights). Defaults to the platform data dir.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a dataset from a CSV file
    Load {
        /// CSV file with the required person columns
        file: PathBuf,
    },

    /// Load a dataset from a JSON endpoint
    Fetch {
        /// URL returning a `{ "people": [...] }` document (default sample URL when omitted)
        url: Option<String>,
    },

    /// Save the dataset to the current CSV file
    Save,

    /// Save the dataset to a new CSV file (and make it current)
    SaveAs {
        /// Destination CSV file
        file: PathBuf,
    },

    /// Manage people in the loaded dataset (list, add, edit, remove)
    People {
        #[command(subcommand)]
        action: Option<PeopleAction>,
    },

    /// Generate the four built-in insight pairings
    Generate,

    /// Generate insights for any attribute pair
    ///
    /// Attributes: os, study, color, hobby, region, language, focus,
    /// course, graduation (plus common aliases).
    Pair {
        /// X attribute (the cohort side)
        attr_x: String,
        /// Y attribute (the pattern side)
        attr_y: String,
    },

    /// Rank attribute pairs and draw the correlation heat map
    Discover {
        /// Use all 9 attributes (81 cells) instead of the 6 core ones
        #[arg(long)]
        all: bool,
    },

    /// Retain insights from the last listing as useful
    Keep {
        /// Indexes from the last `generate`/`pair` listing
        #[arg(required = true)]
        indexes: Vec<usize>,
    },

    /// Block insights from the last listing so they never resurface
    Discard {
        /// Indexes from the last `generate`/`pair` listing
        #[arg(required = true)]
        indexes: Vec<usize>,
    },

    /// List retained insights
    Saved,

    /// List blocked insight keys
    Blocked,

    /// Remove a key from the blocklist
    Unblock {
        /// Exact insight key to unblock
        key: String,
    },
}

#[derive(Subcommand)]
pub enum PeopleAction {
    /// List loaded people
    List,

    /// Add a person
    Add {
        /// Identifier (nickname or id)
        #[arg(long)]
        id: String,

        #[command(flatten)]
        fields: PersonFields,
    },

    /// Edit a person, keeping unspecified fields
    Edit {
        /// Index from `people list`
        index: usize,

        /// New identifier
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: PersonFields,
    },

    /// Remove a person
    Remove {
        /// Index from `people list`
        index: usize,
    },
}

/// Shared attribute flags for add/edit
#[derive(Args)]
pub struct PersonFields {
    /// Graduation year (e.g. 2027)
    #[arg(long)]
    pub graduation_year: Option<i32>,

    /// Region (us-northeast, us-west, china, ...)
    #[arg(long)]
    pub region: Option<String>,

    /// Primary OS (Windows, MacOS, Linux)
    #[arg(long)]
    pub os: Option<String>,

    /// Engineering focus (cybersecurity, electronics, ...)
    #[arg(long)]
    pub focus: Option<String>,

    /// Study time (Morning, Afternoon, Night)
    #[arg(long)]
    pub study: Option<String>,

    /// Number of courses
    #[arg(long)]
    pub course_load: Option<i32>,

    /// Favorite colors, comma-separated
    #[arg(long)]
    pub colors: Option<String>,

    /// Hobbies, comma-separated
    #[arg(long)]
    pub hobbies: Option<String>,

    /// Languages, comma-separated
    #[arg(long)]
    pub languages: Option<String>,
}
