use std::{collections::HashSet, fs, io::ErrorKind, path::Path};

use log::{debug, error, trace, warn};

use crate::{Note, NotesError, Result};

/// Loads the whole note collection from a JSON file.
///
/// A missing file is an empty collection. Notes without an id are rejected;
/// repeated ids keep the first occurrence.
pub fn load_notes_from_file(path: &Path) -> Result<Vec<Note>> {
    debug!("Loading notes from file: {}", path.display());
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No notes file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            error!("Failed to open notes file {}: {}", path.display(), e);
            return Err(NotesError::Io(e));
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let notes: Vec<Note> = serde_json::from_str(&content)?;

    let mut seen = HashSet::with_capacity(notes.len());
    let mut loaded = Vec::with_capacity(notes.len());
    for note in notes {
        if note.id.is_empty() {
            let error_msg = format!("Note '{}' in {} has an empty ID", note.title, path.display());
            error!("{}", error_msg);
            return Err(NotesError::InvalidFormat { message: error_msg });
        }
        if !seen.insert(note.id.clone()) {
            warn!("Dropping duplicate note {} from {}", note.id, path.display());
            continue;
        }
        loaded.push(note);
    }

    trace!("Successfully loaded {} notes", loaded.len());
    Ok(loaded)
}

/// Splits a comma-separated tag list, trimming each tag and discarding empty
/// and repeated ones.
pub fn parse_tags(tags: &str) -> Vec<String> {
    let mut parsed: Vec<String> = Vec::new();
    for tag in tags.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !parsed.iter().any(|t| t == tag) {
            parsed.push(tag.to_string());
        }
    }
    parsed
}

/// First non-empty line of `content`, cut to `max_chars` characters.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parse_tags_trims_and_discards_empties() {
        assert_eq!(parse_tags("home, errands"), vec!["home", "errands"]);
        assert_eq!(parse_tags(" , ,"), Vec::<String>::new());
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags("a,,b ,a"), vec!["a", "b"]);
    }

    #[test]
    fn content_preview_takes_first_line() {
        assert_eq!(content_preview("\n\nhello\nworld", 10), "hello");
        assert_eq!(content_preview("abcdef", 3), "abc...");
        assert_eq!(content_preview("", 3), "");
        assert_eq!(content_preview("äöüß", 2), "äö...");
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let notes = load_notes_from_file(&dir.path().join("notes.json")).unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn empty_id_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"[{"id":"","title":"x","updatedAt":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        let err = load_notes_from_file(&path).unwrap_err();
        assert!(matches!(err, NotesError::InvalidFormat { .. }));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"[
                {"id":"a","title":"first","updatedAt":"2024-01-01T00:00:00Z"},
                {"id":"a","title":"second","updatedAt":"2024-01-02T00:00:00Z"}
            ]"#,
        )
        .unwrap();
        let notes = load_notes_from_file(&path).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "first");
    }

    #[test]
    fn null_tags_do_not_fail_the_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"[
                {"id":"a","title":"fine","tags":["home"],"updatedAt":"2024-01-01T00:00:00Z"},
                {"id":"b","title":"sparse","tags":null,"body":null,"updatedAt":"2024-01-02T00:00:00Z"}
            ]"#,
        )
        .unwrap();
        let notes = load_notes_from_file(&path).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].tags, vec!["home"]);
        assert!(notes[1].tags.is_empty());
        assert_eq!(notes[1].body, "");
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_notes_from_file(&path).unwrap_err();
        assert!(matches!(err, NotesError::Serialization(_)));
    }
}
