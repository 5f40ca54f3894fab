//! Tendency CLI - attribute-correlation insight miner
//!
//! Usage:
//!   tendency load people.csv       Load a dataset
//!   tendency generate              Run the four built-in pairings
//!   tendency pair color hobby      Mine any attribute pair
//!   tendency discover --all        Rank all pairs and draw the heat map
//!   tendency discard 0 2           Block insights from the last listing

mod cli;
mod commands;
mod state;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let mut state = AppState::open(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Load { file } => commands::cmd_load(&mut state, &file),
        Commands::Fetch { url } => commands::cmd_fetch(&mut state, url.as_deref()),
        Commands::Save => commands::cmd_save(&state),
        Commands::SaveAs { file } => commands::cmd_save_as(&mut state, &file),
        Commands::People { action } => match action {
            None | Some(PeopleAction::List) => commands::cmd_people_list(&state),
            Some(PeopleAction::Add { id, fields }) => {
                commands::cmd_people_add(&mut state, &id, &fields)
            }
            Some(PeopleAction::Edit { index, id, fields }) => {
                commands::cmd_people_edit(&mut state, index, id.as_deref(), &fields)
            }
            Some(PeopleAction::Remove { index }) => commands::cmd_people_remove(&mut state, index),
        },
        Commands::Generate => commands::cmd_generate(&state),
        Commands::Pair { attr_x, attr_y } => commands::cmd_pair(&state, &attr_x, &attr_y),
        Commands::Discover { all } => commands::cmd_discover(&state, all),
        Commands::Keep { indexes } => commands::cmd_keep(&mut state, &indexes),
        Commands::Discard { indexes } => commands::cmd_discard(&mut state, &indexes),
        Commands::Saved => commands::cmd_saved(&state),
        Commands::Blocked => commands::cmd_blocked(&state),
        Commands::Unblock { key } => commands::cmd_unblock(&mut state, &key),
    }
}
