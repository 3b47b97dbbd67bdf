use std::{
    cell::{Cell, RefCell},
    fs,
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, error, info, trace};
use tempfile::NamedTempFile;

use crate::{load_notes_from_file, Note, NotesError, Result};

/// Persistence collaborator for the note collection.
///
/// `load` returns an empty collection when nothing was saved yet. `save`
/// replaces everything previously stored with `notes`.
pub trait NoteRepository {
    fn load(&self) -> Result<Vec<Note>>;
    fn save(&self, notes: &[Note]) -> Result<()>;
}

/// Stores the whole collection as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Location of the JSON document
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteRepository for JsonFileStorage {
    fn load(&self) -> Result<Vec<Note>> {
        let notes = load_notes_from_file(&self.path)?;
        info!("Loaded {} notes from {}", notes.len(), self.path.display());
        Ok(notes)
    }

    /// Saves the collection using atomic operations to prevent data corruption
    fn save(&self, notes: &[Note]) -> Result<()> {
        debug!("Saving {} notes to {}", notes.len(), self.path.display());

        // Ensure the parent directory exists
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            debug!("Creating parent directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory {}: {}", dir.display(), e);
                NotesError::Io(e)
            })?;
        }

        // Create a temporary file in the same directory (for atomic operation)
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NotesError::Io(e)
        })?;

        trace!("Serializing notes to JSON");
        let json = serde_json::to_string_pretty(notes).map_err(|e| {
            error!("Failed to serialize notes: {}", e);
            NotesError::Serialization(e)
        })?;

        temp_file.write_all(json.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            NotesError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            NotesError::Io(e)
        })?;

        // Atomically move the temporary file to the target location
        temp_file.persist(&self.path).map_err(|e| {
            error!(
                "Failed to persist file {}: {}",
                self.path.display(),
                e.error
            );
            NotesError::Io(e.error)
        })?;

        trace!("Notes saved to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the saved collection in memory. Clones share the same blob, so a
/// caller can hand one clone to a store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    notes: Rc<RefCell<Vec<Note>>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `notes` already saved.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Rc::new(RefCell::new(notes)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Copy of the currently saved collection.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.borrow().clone()
    }
}

impl NoteRepository for MemoryStorage {
    fn load(&self) -> Result<Vec<Note>> {
        Ok(self.snapshot())
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        *self.notes.borrow_mut() = notes.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
