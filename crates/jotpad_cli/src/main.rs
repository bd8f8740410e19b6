//! Jotpad command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the configured store.
//! - Translate subcommands into `NoteService` calls and print the results.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Cli, Commands};
use jotpad_core::{
    init_logging, open_store, CoreConfig, KeyValueStore, LoadOutcome, NoteRepository, NoteService,
};
use log::info;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    // Logging is best effort; the notes still work without it.
    if let Err(err) = init_logging(&config.log_level, config.resolved_log_dir()) {
        eprintln!("warning: file logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok core_version={} backend={}",
        jotpad_core::core_version(),
        config.backend.as_str()
    );

    let store = open_store(&config).context("failed to open note store")?;
    let repo = NoteRepository::load_with_slot(store, config.slot_key.as_str());
    match repo.load_outcome() {
        LoadOutcome::DecodeFailed => {
            eprintln!("warning: stored notes could not be read; starting with an empty list");
        }
        // Writing now could replace notes that are only temporarily unreadable.
        LoadOutcome::StoreUnavailable => {
            anyhow::bail!("stored notes could not be read from the store; nothing was changed");
        }
        LoadOutcome::Empty | LoadOutcome::Restored { .. } => {}
    }

    let mut service = NoteService::new(repo);
    let report = execute(&mut service, cli.command)?;

    if !service.repository().is_persisted() {
        anyhow::bail!("changes could not be saved; see the log for details");
    }
    println!("{report}");
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::from_env().context("invalid JOTPAD_* environment")?;

    if let Some(backend) = cli.store {
        config.backend = backend;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(slot) = &cli.slot {
        config.slot_key = slot.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if config.data_dir.is_relative() {
        let cwd = std::env::current_dir().context("cannot resolve current directory")?;
        config.data_dir = cwd.join(&config.data_dir);
    }

    config.validate()?;
    Ok(config)
}

/// Runs one subcommand and returns what should be printed on success.
fn execute<S: KeyValueStore>(service: &mut NoteService<S>, command: Commands) -> Result<String> {
    let report = match command {
        Commands::Add { title, content } => service.create_note(&title, content)?.id.to_string(),
        Commands::List => output::format_note_list(&service.list_notes()),
        Commands::Show { id } => output::format_note_detail(&service.get_note(id)?),
        Commands::Edit { id, title, content } => {
            let content = match content {
                Some(content) => content,
                None => service.get_note(id)?.content,
            };
            let note = service.update_note(id, &title, content)?;
            format!("Updated {}", note.id)
        }
        Commands::Toggle { id } => {
            let note = service.toggle_completion(id)?;
            format!("{}: {}", note.title, note.status_label())
        }
        Commands::Delete { positions } => {
            let removed = service.delete_notes(&positions)?;
            format!("Deleted {removed} note(s).")
        }
    };
    Ok(report)
}
