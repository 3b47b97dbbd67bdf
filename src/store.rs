//! The note store: owns the authoritative collection and persists it after
//! every successful mutation.
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use ulid::Ulid;

use crate::{Note, NoteInput, NoteRepository, NotesError, Priority, Result};

/// Manages the note collection and its persistence.
pub struct NoteStore<R: NoteRepository> {
    /// Notes, most recently created first
    notes: Vec<Note>,

    /// Persistence collaborator
    repository: R,

    /// Priority given to new notes that do not name one
    default_priority: Priority,

    /// Last timestamp handed out, so `updated_at` always moves forward
    last_stamp: Option<DateTime<Utc>>,
}

impl<R: NoteRepository> NoteStore<R> {
    /// Opens a store over whatever the repository holds.
    pub fn open(repository: R) -> Result<Self> {
        let notes = repository.load()?;
        let last_stamp = notes.iter().map(|n| n.updated_at).max();
        debug!("Opened note store with {} notes", notes.len());

        Ok(Self {
            notes,
            repository,
            default_priority: Priority::default(),
            last_stamp,
        })
    }

    pub fn with_default_priority(mut self, priority: Priority) -> Self {
        self.default_priority = priority;
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Creates a note at the front of the collection and saves.
    ///
    /// The note is kept in memory even when the save fails.
    pub fn create(&mut self, input: &NoteInput) -> Result<Note> {
        let id = self.fresh_id();
        let now = self.stamp();
        let note = Note::from_input(id, input, self.default_priority.clone(), now);

        self.notes.insert(0, note.clone());
        self.persist()?;

        info!("Created note {} ({})", note.id, note.title);
        Ok(note)
    }

    /// Merges `input` into the note with `id`. Completion is never changed here.
    pub fn update(&mut self, id: &str, input: &NoteInput) -> Result<Note> {
        let idx = self.position(id)?;
        let now = self.stamp();

        let note = &mut self.notes[idx];
        note.apply(input, now);
        let note = note.clone();
        self.persist()?;

        info!("Updated note {}", note.id);
        Ok(note)
    }

    /// Removes the note with `id`, returning it.
    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let idx = self.position(id)?;
        let note = self.notes.remove(idx);
        self.persist()?;

        info!("Deleted note {} ({})", note.id, note.title);
        Ok(note)
    }

    /// Flips the completed flag of the note with `id`.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Note> {
        let idx = self.position(id)?;
        let now = self.stamp();

        let note = &mut self.notes[idx];
        note.completed = !note.completed;
        note.updated_at = now;
        let note = note.clone();
        self.persist()?;

        info!(
            "Marked note {} as {}",
            note.id,
            if note.completed { "done" } else { "not done" }
        );
        Ok(note)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.notes.iter().position(|n| n.id == id).ok_or_else(|| {
            warn!("No note with id {}", id);
            NotesError::NoteNotFound { id: id.to_string() }
        })
    }

    fn persist(&self) -> Result<()> {
        self.repository.save(&self.notes).inspect_err(|e| {
            warn!("Failed to save notes, in-memory state kept: {}", e);
        })
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Ulid::new().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Current time, nudged forward so it is strictly after the last stamp.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}
