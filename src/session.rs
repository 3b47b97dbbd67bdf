//! Adapter between a front end and the core: turns user gestures into store
//! mutations and filter changes, then recomputes the view.
use log::debug;

use crate::{
    project, FilterSpec, Note, NoteInput, NoteRepository, NoteStore, PriorityFilter, Projection,
    Result, SortOrder,
};

/// A user gesture a front end can forward.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Create(NoteInput),
    Update { id: String, input: NoteInput },
    Delete(String),
    ToggleComplete(String),
    ShowCompleted(bool),
    FilterPriority(PriorityFilter),
    SelectTag(String),
    ClearTag,
    Search(String),
    ClearSearch,
    Sort(SortOrder),
    ResetFilters,
}

/// What a front end needs to redraw after an action.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    /// The note created, edited, toggled or deleted, if any
    pub changed: Option<Note>,
    pub projection: Projection,
}

/// One interactive session: a store plus the filters currently selected.
pub struct Session<R: NoteRepository> {
    store: NoteStore<R>,
    filters: FilterSpec,
}

impl<R: NoteRepository> Session<R> {
    /// Starts a session with default filters.
    pub fn new(store: NoteStore<R>) -> Self {
        Self {
            store,
            filters: FilterSpec::default(),
        }
    }

    pub fn store(&self) -> &NoteStore<R> {
        &self.store
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// Current view without changing anything.
    pub fn view(&self) -> Projection {
        project(self.store.notes(), &self.filters)
    }

    /// Applies `action` and returns the recomputed view.
    ///
    /// A failed mutation leaves the filters untouched and returns the error;
    /// the store keeps whatever in-memory state it reached.
    pub fn dispatch(&mut self, action: Action) -> Result<ViewUpdate> {
        debug!("Dispatching {:?}", action);
        let changed = match action {
            Action::Create(input) => Some(self.store.create(&input)?),
            Action::Update { id, input } => Some(self.store.update(&id, &input)?),
            Action::Delete(id) => Some(self.store.delete(&id)?),
            Action::ToggleComplete(id) => Some(self.store.toggle_complete(&id)?),
            Action::ShowCompleted(show) => {
                self.filters.set_show_completed(show);
                None
            }
            Action::FilterPriority(priority) => {
                self.filters.set_priority(priority);
                None
            }
            Action::SelectTag(tag) => {
                self.filters.select_tag(&tag);
                None
            }
            Action::ClearTag => {
                self.filters.clear_tag();
                None
            }
            Action::Search(text) => {
                self.filters.set_search(&text);
                None
            }
            Action::ClearSearch => {
                self.filters.clear_search();
                None
            }
            Action::Sort(sort) => {
                self.filters.set_sort(sort);
                None
            }
            Action::ResetFilters => {
                self.filters.reset();
                None
            }
        };

        Ok(ViewUpdate {
            changed,
            projection: self.view(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, Priority};
    use pretty_assertions::assert_eq;

    fn session() -> Session<MemoryStorage> {
        Session::new(NoteStore::open(MemoryStorage::new()).unwrap())
    }

    fn create(session: &mut Session<MemoryStorage>, input: NoteInput) -> Note {
        session
            .dispatch(Action::Create(input))
            .unwrap()
            .changed
            .unwrap()
    }

    #[test]
    fn create_shows_up_in_view() {
        let mut session = session();
        let update = session
            .dispatch(Action::Create(NoteInput::titled("Buy milk").with_tags("home")))
            .unwrap();
        let note = update.changed.unwrap();
        assert_eq!(update.projection.visible, vec![note]);
        assert_eq!(update.projection.stats.tag_counts.get("home"), Some(&1));
    }

    #[test]
    fn completed_note_hidden_but_counted() {
        let mut session = session();
        let a = create(&mut session, NoteInput::titled("A"));
        let b = create(&mut session, NoteInput::titled("B"));

        session.dispatch(Action::ToggleComplete(a.id.clone())).unwrap();
        let update = session.dispatch(Action::ShowCompleted(false)).unwrap();

        assert_eq!(update.changed, None);
        let ids: Vec<_> = update.projection.visible.iter().map(|n| &n.id).collect();
        assert_eq!(ids, vec![&b.id]);
        assert_eq!(update.projection.stats.completed_count, 1);
        assert_eq!(update.projection.stats.total_count, 2);
    }

    #[test]
    fn filters_compose_and_reset() {
        let mut session = session();
        create(&mut session, NoteInput::titled("Groceries").with_tags("home"));
        create(
            &mut session,
            NoteInput::titled("Report").with_priority(Priority::High).with_tags("work"),
        );

        session.dispatch(Action::SelectTag("work".into())).unwrap();
        let update = session.dispatch(Action::Search("  REP ".into())).unwrap();
        assert_eq!(update.projection.stats.visible_count, 1);
        assert_eq!(session.filters().search, "REP");

        session.dispatch(Action::FilterPriority(PriorityFilter::Low)).unwrap();
        assert!(session.view().visible.is_empty());

        session.dispatch(Action::ClearTag).unwrap();
        session.dispatch(Action::ClearSearch).unwrap();
        let update = session.dispatch(Action::ResetFilters).unwrap();
        assert!(session.filters().is_default());
        assert_eq!(update.projection.visible.len(), 2);
    }

    #[test]
    fn empty_tag_selection_shows_everything() {
        let mut session = session();
        create(&mut session, NoteInput::titled("Tagged").with_tags("x"));

        let update = session.dispatch(Action::SelectTag(String::new())).unwrap();
        assert_eq!(update.projection.stats.visible_count, 1);
        assert_eq!(session.filters().tag, None);
    }

    #[test]
    fn sort_action_reorders() {
        let mut session = session();
        let high = create(&mut session, NoteInput::titled("A").with_priority(Priority::High));
        let low = create(&mut session, NoteInput::titled("B").with_priority(Priority::Low));

        let ids = |p: &Projection| p.visible.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&session.view()), vec![low.id.clone(), high.id.clone()]);

        let update = session.dispatch(Action::Sort(SortOrder::PriorityDesc)).unwrap();
        assert_eq!(ids(&update.projection), vec![high.id, low.id]);
    }

    #[test]
    fn update_and_delete_through_dispatch() {
        let mut session = session();
        let note = create(&mut session, NoteInput::titled("Draft"));

        let update = session
            .dispatch(Action::Update {
                id: note.id.clone(),
                input: NoteInput::titled("Final"),
            })
            .unwrap();
        assert_eq!(update.changed.unwrap().title, "Final");

        let update = session.dispatch(Action::Delete(note.id.clone())).unwrap();
        assert_eq!(update.changed.map(|n| n.id), Some(note.id.clone()));
        assert!(update.projection.visible.is_empty());
    }

    #[test]
    fn missing_id_is_reported() {
        let mut session = session();
        session.dispatch(Action::ShowCompleted(false)).unwrap();
        let err = session
            .dispatch(Action::Delete("nope".into()))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!session.filters().show_completed);
    }
}
