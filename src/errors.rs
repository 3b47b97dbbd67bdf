//! Error types for the swiftnotes application.
//!
//! This module defines the error taxonomy shared by the note store, the
//! persistence layer, and the command-line front end.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the swiftnotes application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// Invalid note data in the persisted collection.
    #[error("Invalid note format: {message}")]
    InvalidFormat { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}

impl NotesError {
    /// Whether the error only means the referenced note does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NotesError::NoteNotFound { .. })
    }
}
