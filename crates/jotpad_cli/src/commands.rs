//! CLI command definitions.

use clap::{Parser, Subcommand};
use jotpad_core::{NoteId, StoreBackend};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jotpad")]
#[command(about = "Local note keeper", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Store backend (memory, file, sqlite); overrides JOTPAD_STORE
    #[arg(long, global = true, value_name = "BACKEND")]
    pub store: Option<StoreBackend>,

    /// Data directory; overrides JOTPAD_DATA_DIR
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Slot holding the serialized notes; overrides JOTPAD_SLOT
    #[arg(long, global = true, value_name = "KEY")]
    pub slot: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides JOTPAD_LOG_LEVEL
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a note and print its id
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },

    /// List notes with their positions
    List,

    /// Show one note
    Show { id: NoteId },

    /// Replace the title (and optionally the content) of a note
    Edit {
        id: NoteId,
        title: String,
        /// Keeps the current content when omitted
        content: Option<String>,
    },

    /// Flip a note between completed and in progress
    Toggle { id: NoteId },

    /// Delete notes by list position
    Delete {
        #[arg(required = true, num_args = 1..)]
        positions: Vec<usize>,
    },
}
