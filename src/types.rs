//! Shared types for the swiftnotes application.
//!
//! Holds the crate-wide `Result` alias and the subcommands of the CLI.
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::{NotesError, Priority, PriorityFilter, SortOrder};

/// A specialized Result type for swiftnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Available subcommands for the swiftnotes application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[clap(alias = "create")]
    New {
        /// Title of the note ("Untitled" when blank)
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Body text of the note
        #[clap(short, long)]
        body: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[clap(short, long)]
        due: Option<NaiveDate>,

        /// Priority of the note (defaults to the configured priority)
        #[clap(short, long, value_enum)]
        priority: Option<Priority>,

        /// Tags to associate with the note (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Open the body in an editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Path to a file containing the note's body
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// Edit an existing note; omitted fields keep their value
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New body for the note
        #[clap(short, long)]
        body: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[clap(short, long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,

        /// Remove the due date
        #[clap(long)]
        clear_due: bool,

        /// New priority
        #[clap(short, long, value_enum)]
        priority: Option<Priority>,

        /// Replace the tags (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Open the current body in an editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Path to a file containing the new body
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Mark a note done, or undo it
    #[clap(alias = "done")]
    Toggle {
        /// ID of the note to toggle
        id: String,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List notes with optional filtering and sorting
    List {
        /// Hide completed notes
        #[clap(long)]
        hide_completed: bool,

        /// Only show notes of this priority
        #[clap(short, long, value_enum, default_value_t = PriorityFilter::All)]
        priority: PriorityFilter,

        /// Only show notes carrying this tag
        #[clap(short, long)]
        tag: Option<String>,

        /// Case-insensitive text to look for in title, body and tags
        #[clap(short, long)]
        search: Option<String>,

        /// Sort order
        #[clap(long, value_enum, default_value_t = SortOrder::UpdatedDesc)]
        sort: SortOrder,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List every tag with the number of notes carrying it
    Tags {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Show completed and total note counts
    Stats,

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
