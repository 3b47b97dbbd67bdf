//! Core data structures for the swiftnotes application.
//!
//! This module contains the `Note` record, its `Priority`, and the `NoteInput`
//! used to create and edit notes. Input is normalized, never rejected.
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::parse_tags;

/// Title given to notes created or edited with a blank title.
pub const UNTITLED: &str = "Untitled";

/// Importance of a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    /// Any stored priority this version does not recognize, kept verbatim.
    #[value(skip)]
    Other(String),
}

impl Priority {
    /// Sort rank: high 3, medium 2, low 1, anything else 0.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::Other(_) => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(raw) => raw,
        }
    }

    /// Parses a stored priority; unknown values are kept as `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            other => Priority::Other(other.to_string()),
        }
    }

    /// Capitalized label used on note cards.
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Priority::parse(&s))
    }
}

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note, never changed after creation
    pub id: String,
    /// Note title, never empty
    pub title: String,
    /// Free text body
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    /// Optional due date
    #[serde(default)]
    pub due: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    /// Tags for organization, trimmed and non-empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    /// Refreshed on creation and on every change, including completion
    pub updated_at: DateTime<Utc>,
}

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Note {
    /// Builds a fresh, uncompleted note from user input.
    pub fn from_input(
        id: String,
        input: &NoteInput,
        default_priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Note {
            id,
            title: normalize_title(input.title.as_deref().unwrap_or_default()),
            body: input.body.as_deref().unwrap_or_default().trim().to_string(),
            due: input.due.flatten(),
            priority: input.priority.clone().unwrap_or(default_priority),
            tags: input.tags.as_deref().map(parse_tags).unwrap_or_default(),
            completed: false,
            updated_at: now,
        }
    }

    /// Merges the provided fields into this note. `completed` is left alone.
    pub fn apply(&mut self, input: &NoteInput, now: DateTime<Utc>) {
        if let Some(title) = &input.title {
            self.title = normalize_title(title);
        }
        if let Some(body) = &input.body {
            self.body = body.trim().to_string();
        }
        if let Some(due) = input.due {
            self.due = due;
        }
        if let Some(priority) = &input.priority {
            self.priority = priority.clone();
        }
        if let Some(tags) = &input.tags {
            self.tags = parse_tags(tags);
        }
        self.updated_at = now;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Title, body and tags joined by single spaces, as searched by the filter.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.body, self.tags.join(" "))
    }
}

/// User-supplied fields for creating or editing a note.
///
/// On create, absent fields take their defaults. On update, absent fields keep
/// the stored value. `due: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub due: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    /// Raw comma-separated tag list
    pub tags: Option<String>,
}

impl NoteInput {
    pub fn titled(title: impl Into<String>) -> Self {
        NoteInput {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_due(mut self, due: Option<NaiveDate>) -> Self {
        self.due = Some(due);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }
}

/// Trims the title, substituting `UNTITLED` when nothing is left.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn blank_title_becomes_untitled() {
        assert_eq!(normalize_title("   "), "Untitled");
        assert_eq!(normalize_title(""), "Untitled");
        assert_eq!(normalize_title("  Buy milk "), "Buy milk");
    }

    #[test]
    fn from_input_applies_defaults() {
        let note = Note::from_input("a".into(), &NoteInput::default(), Priority::Low, stamp());
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.body, "");
        assert_eq!(note.due, None);
        assert_eq!(note.priority, Priority::Low);
        assert!(note.tags.is_empty());
        assert!(!note.completed);
        assert_eq!(note.updated_at, stamp());
    }

    #[test]
    fn from_input_normalizes_fields() {
        let input = NoteInput::titled(" Buy milk ")
            .with_body("  two litres \n")
            .with_tags("home, errands, ,home")
            .with_priority(Priority::High);
        let note = Note::from_input("a".into(), &input, Priority::Low, stamp());
        assert_eq!(note.title, "Buy milk");
        assert_eq!(note.body, "two litres");
        assert_eq!(note.tags, vec!["home", "errands"]);
        assert_eq!(note.priority, Priority::High);
    }

    #[test]
    fn apply_keeps_absent_fields_and_completion() {
        let due = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut note = Note::from_input(
            "a".into(),
            &NoteInput::titled("Plan").with_due(Some(due)).with_tags("work"),
            Priority::Medium,
            stamp(),
        );
        note.completed = true;

        let later = stamp() + chrono::Duration::minutes(5);
        note.apply(&NoteInput::default().with_body("details"), later);

        assert_eq!(note.title, "Plan");
        assert_eq!(note.body, "details");
        assert_eq!(note.due, Some(due));
        assert_eq!(note.tags, vec!["work"]);
        assert!(note.completed);
        assert_eq!(note.updated_at, later);
    }

    #[test]
    fn apply_can_clear_due_date() {
        let due = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut note = Note::from_input(
            "a".into(),
            &NoteInput::default().with_due(Some(due)),
            Priority::Low,
            stamp(),
        );
        note.apply(&NoteInput::default().with_due(None), stamp());
        assert_eq!(note.due, None);
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
        assert_eq!(Priority::Other("urgent".into()).rank(), 0);
    }

    #[test]
    fn deserializes_stored_blob_shape() {
        let json = r#"{
            "id": "lx2k9abcd",
            "title": "Groceries",
            "body": "",
            "due": null,
            "priority": "urgent",
            "tags": ["home"],
            "completed": true,
            "updatedAt": "2024-03-01T10:00:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.priority, Priority::Other("urgent".into()));
        assert!(note.completed);
        assert_eq!(note.updated_at, stamp());

        let out = serde_json::to_value(&note).unwrap();
        assert_eq!(out["updatedAt"], "2024-03-01T10:00:00Z");
        assert_eq!(out["priority"], "urgent");
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let json = r#"{
            "id": "a",
            "title": "Sparse",
            "body": null,
            "due": null,
            "priority": null,
            "tags": null,
            "completed": null,
            "updatedAt": "2024-03-01T10:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.body, "");
        assert_eq!(note.due, None);
        assert_eq!(note.priority, Priority::Low);
        assert!(note.tags.is_empty());
        assert!(!note.completed);
    }

    #[test]
    fn unknown_priority_label_is_capitalized() {
        assert_eq!(Priority::parse("urgent").label(), "Urgent");
        assert_eq!(Priority::parse("").label(), "");
        assert_eq!(Priority::High.label(), "High");
    }

    #[test]
    fn search_text_joins_fields() {
        let note = Note::from_input(
            "a".into(),
            &NoteInput::titled("Groceries").with_body("milk").with_tags("home,errands"),
            Priority::Low,
            stamp(),
        );
        assert_eq!(note.search_text(), "Groceries milk home errands");
    }
}
