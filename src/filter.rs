//! Session-local filter state. Never persisted; every session starts from
//! `FilterSpec::default()`.
use clap::ValueEnum;
use serde::Serialize;

use crate::Priority;

/// Which priorities the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriorityFilter {
    pub fn matches(self, priority: &Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Low => *priority == Priority::Low,
            PriorityFilter::Medium => *priority == Priority::Medium,
            PriorityFilter::High => *priority == Priority::High,
        }
    }
}

/// Order of the projected notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently updated first
    #[default]
    #[value(name = "updated_desc", alias = "updated")]
    UpdatedDesc,
    /// Earliest due date first; notes without a due date come before all others
    #[value(name = "due_asc", alias = "due")]
    DueAsc,
    /// High, then medium, then low
    #[value(name = "priority_desc", alias = "priority")]
    PriorityDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// When false, completed notes are hidden
    pub show_completed: bool,
    pub priority: PriorityFilter,
    /// Only notes carrying this exact tag
    pub tag: Option<String>,
    /// Case-insensitive substring of title, body and tags; empty matches all
    pub search: String,
    pub sort: SortOrder,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            show_completed: true,
            priority: PriorityFilter::All,
            tag: None,
            search: String::new(),
            sort: SortOrder::UpdatedDesc,
        }
    }
}

impl FilterSpec {
    pub fn set_show_completed(&mut self, show: bool) {
        self.show_completed = show;
    }

    pub fn set_priority(&mut self, priority: PriorityFilter) {
        self.priority = priority;
    }

    /// Filters on `tag`; a blank tag selects nothing and clears the filter.
    pub fn select_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        self.tag = (!tag.is_empty()).then(|| tag.to_string());
    }

    pub fn clear_tag(&mut self) {
        self.tag = None;
    }

    /// Sets the search text, trimmed the way the search box trims it.
    pub fn set_search(&mut self, search: &str) {
        self.search = search.trim().to_string();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Back to the defaults a fresh session starts with.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
