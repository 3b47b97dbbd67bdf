//! Derives the displayed note list and its aggregates from the stored notes
//! and a `FilterSpec`. Pure: nothing here mutates or fails.
use std::{cmp::Ordering, collections::BTreeMap};

use log::trace;
use serde::Serialize;

use crate::{FilterSpec, Note, SortOrder};

/// Aggregates shown next to the note list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Notes in the whole collection
    pub total_count: usize,
    /// Completed notes in the whole collection
    pub completed_count: usize,
    /// Notes left after filtering
    pub visible_count: usize,
    /// Occurrences of each tag across the whole collection, alphabetical
    pub tag_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    pub visible: Vec<Note>,
    pub stats: Stats,
}

/// Filters and sorts `notes` according to `filters`.
pub fn project(notes: &[Note], filters: &FilterSpec) -> Projection {
    let query = filters.search.to_lowercase();

    let mut visible: Vec<Note> = notes
        .iter()
        .filter(|n| query.is_empty() || n.search_text().to_lowercase().contains(&query))
        .filter(|n| filters.show_completed || !n.completed)
        .filter(|n| filters.priority.matches(&n.priority))
        .filter(|n| filters.tag.as_deref().map_or(true, |tag| n.has_tag(tag)))
        .cloned()
        .collect();

    sort_notes(&mut visible, filters.sort);
    trace!("Projected {} of {} notes", visible.len(), notes.len());

    let stats = Stats {
        total_count: notes.len(),
        completed_count: notes.iter().filter(|n| n.completed).count(),
        visible_count: visible.len(),
        tag_counts: tag_counts(notes),
    };

    Projection { visible, stats }
}

/// Sorts notes in place by `order`.
pub fn sort_notes(notes: &mut [Note], order: SortOrder) {
    notes.sort_by(|a, b| compare(a, b, order));
}

fn compare(a: &Note, b: &Note, order: SortOrder) -> Ordering {
    match order {
        SortOrder::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
        // `None` orders before any date, so undated notes come first
        SortOrder::DueAsc => a.due.cmp(&b.due),
        SortOrder::PriorityDesc => b.priority.rank().cmp(&a.priority.rank()),
    }
}

/// Counts how many notes carry each tag.
pub fn tag_counts(notes: &[Note]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tag in notes.iter().flat_map(|n| n.tags.iter()) {
        *counts.entry(tag.clone()).or_insert(0) += 1;
    }
    counts
}
