//! App session facade.
//!
//! # Responsibility
//! - Own the store plus every feature service and expose the operation
//!   surface hosts call.
//! - Drive periodic work (`tick`): autosave deadlines, reminder scans,
//!   toast expiry.
//!
//! # Invariants
//! - The active view is persisted on every switch and restored on open.
//! - Switching away from a pending note edit commits it first.

use crate::dashboard::{self, DashboardSnapshot};
use crate::model::note::{Folder, FolderId, NoteId};
use crate::model::todo::{Priority, ReminderPolicy, SubtaskId, Todo, TodoId};
use crate::model::view::View;
use crate::notes::{AutosavePhase, EditorBuffer, NotesError, NotesWorkspace};
use crate::notify::{NotificationCenter, NotificationSink, NotifyError, Toast, ToastId};
use crate::search::{self, NoteHit, NoteQuery};
use crate::store::{keys, StateStore, StoreBinding, StoreError};
use crate::timer::FocusTimer;
use crate::todos::{ReminderEvent, ReminderScanner, TodoError, TodoService};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Toast title used for fired reminders.
const REMINDER_TOAST_TITLE: &str = "Reminder";

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by session operations.
#[derive(Debug)]
pub enum SessionError {
    Notes(NotesError),
    Todos(TodoError),
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notes(err) => write!(f, "{err}"),
            Self::Todos(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Notes(err) => Some(err),
            Self::Todos(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<NotesError> for SessionError {
    fn from(value: NotesError) -> Self {
        Self::Notes(value)
    }
}

impl From<TodoError> for SessionError {
    fn from(value: TodoError) -> Self {
        Self::Todos(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of one periodic tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTick {
    /// Autosave phase after this tick.
    pub autosave: AutosavePhase,
    /// Reminders that fired on this tick.
    pub reminders: Vec<ReminderEvent>,
    /// Toasts dropped by auto-dismiss on this tick.
    pub toasts_expired: usize,
}

/// One open app session over a durable store.
pub struct AppSession<S: StateStore> {
    store: S,
    active_view: StoreBinding<View>,
    notes: NotesWorkspace,
    todos: TodoService,
    scanner: ReminderScanner,
    timer: FocusTimer,
    notifications: NotificationCenter,
}

impl<S: StateStore> AppSession<S> {
    /// Opens a session, restoring state from the store.
    pub fn open(mut store: S) -> SessionResult<Self> {
        let active_view = StoreBinding::load(&store, keys::ACTIVE_VIEW, View::default())?;
        let notes = NotesWorkspace::load(&mut store)?;
        let todos = TodoService::load(&store)?;

        info!(
            "event=session_open module=session status=ok view={:?} folders={} todos={}",
            active_view.get(),
            notes.folders().len(),
            todos.todos().len()
        );

        Ok(Self {
            store,
            active_view,
            notes,
            todos,
            scanner: ReminderScanner::new(),
            timer: FocusTimer::new(),
            notifications: NotificationCenter::new(),
        })
    }

    // --- view ---

    pub fn active_view(&self) -> View {
        *self.active_view.get()
    }

    /// Switches the active view, committing any pending note edit.
    pub fn set_active_view(&mut self, view: View, now_ms: i64) -> SessionResult<()> {
        self.notes.flush_pending(&mut self.store, now_ms)?;
        self.active_view.set(&mut self.store, view)?;
        Ok(())
    }

    // --- notes ---

    pub fn folders(&self) -> &[Folder] {
        self.notes.folders()
    }

    pub fn selected_folder_id(&self) -> Option<FolderId> {
        self.notes.selected_folder_id()
    }

    pub fn selected_note_id(&self) -> Option<NoteId> {
        self.notes.selected_note_id()
    }

    pub fn editor_buffer(&self) -> Option<&EditorBuffer> {
        self.notes.buffer()
    }

    pub fn autosave_phase(&self) -> AutosavePhase {
        self.notes.autosave_phase()
    }

    pub fn add_folder(&mut self, name: &str, now_ms: i64) -> SessionResult<FolderId> {
        Ok(self.notes.add_folder(&mut self.store, name, now_ms)?)
    }

    pub fn delete_folder(&mut self, folder_id: FolderId) -> SessionResult<()> {
        Ok(self.notes.delete_folder(&mut self.store, folder_id)?)
    }

    pub fn select_folder(&mut self, folder_id: FolderId, now_ms: i64) -> SessionResult<()> {
        Ok(self.notes.select_folder(&mut self.store, folder_id, now_ms)?)
    }

    pub fn add_note(&mut self, now_ms: i64) -> SessionResult<NoteId> {
        Ok(self.notes.add_note(&mut self.store, now_ms)?)
    }

    pub fn delete_note(&mut self, note_id: NoteId) -> SessionResult<()> {
        Ok(self.notes.delete_note(&mut self.store, note_id)?)
    }

    pub fn select_note(&mut self, note_id: Option<NoteId>, now_ms: i64) -> SessionResult<()> {
        Ok(self.notes.select_note(&mut self.store, note_id, now_ms)?)
    }

    pub fn edit_note_title(&mut self, value: &str, now_ms: i64) -> SessionResult<()> {
        Ok(self.notes.edit_title(value, now_ms)?)
    }

    pub fn edit_note_content(&mut self, value: &str, now_ms: i64) -> SessionResult<()> {
        Ok(self.notes.edit_content(value, now_ms)?)
    }

    /// Commits a pending note edit immediately.
    pub fn flush_note_edit(&mut self, now_ms: i64) -> SessionResult<()> {
        Ok(self.notes.flush_pending(&mut self.store, now_ms)?)
    }

    // --- todos ---

    pub fn todos(&self) -> &[Todo] {
        self.todos.todos()
    }

    pub fn add_todo(&mut self, text: &str) -> SessionResult<TodoId> {
        Ok(self.todos.add(&mut self.store, text)?)
    }

    pub fn toggle_todo(&mut self, todo_id: TodoId) -> SessionResult<()> {
        Ok(self.todos.toggle(&mut self.store, todo_id)?)
    }

    pub fn remove_todo(&mut self, todo_id: TodoId) -> SessionResult<()> {
        Ok(self.todos.remove(&mut self.store, todo_id)?)
    }

    pub fn set_todo_text(&mut self, todo_id: TodoId, text: &str) -> SessionResult<()> {
        Ok(self.todos.set_text(&mut self.store, todo_id, text)?)
    }

    pub fn set_todo_priority(&mut self, todo_id: TodoId, priority: Priority) -> SessionResult<()> {
        Ok(self.todos.set_priority(&mut self.store, todo_id, priority)?)
    }

    pub fn set_todo_due_date(&mut self, todo_id: TodoId, due_ms: Option<i64>) -> SessionResult<()> {
        Ok(self.todos.set_due_date(&mut self.store, todo_id, due_ms)?)
    }

    pub fn set_todo_reminder(
        &mut self,
        todo_id: TodoId,
        policy: ReminderPolicy,
    ) -> SessionResult<()> {
        Ok(self.todos.set_reminder_policy(&mut self.store, todo_id, policy)?)
    }

    pub fn move_todo(&mut self, todo_id: TodoId, new_index: usize) -> SessionResult<()> {
        Ok(self.todos.move_todo(&mut self.store, todo_id, new_index)?)
    }

    pub fn add_subtask(&mut self, todo_id: TodoId, text: &str) -> SessionResult<SubtaskId> {
        Ok(self.todos.add_subtask(&mut self.store, todo_id, text)?)
    }

    pub fn toggle_subtask(&mut self, todo_id: TodoId, subtask_id: SubtaskId) -> SessionResult<()> {
        Ok(self.todos.toggle_subtask(&mut self.store, todo_id, subtask_id)?)
    }

    pub fn remove_subtask(&mut self, todo_id: TodoId, subtask_id: SubtaskId) -> SessionResult<()> {
        Ok(self.todos.remove_subtask(&mut self.store, todo_id, subtask_id)?)
    }

    // --- timer ---

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FocusTimer {
        &mut self.timer
    }

    // --- notifications ---

    pub fn register_sink(&mut self, sink: Arc<dyn NotificationSink>) -> Result<(), NotifyError> {
        self.notifications.register_sink(sink)
    }

    pub fn toasts(&self) -> &[Toast] {
        self.notifications.toasts()
    }

    pub fn dismiss_toast(&mut self, toast_id: ToastId) -> bool {
        self.notifications.dismiss(toast_id)
    }

    // --- projections ---

    pub fn dashboard(&self, now_ms: i64) -> DashboardSnapshot {
        dashboard::snapshot(self.notes.folders(), self.todos.todos(), now_ms)
    }

    pub fn search_notes(&self, query: &NoteQuery) -> Vec<NoteHit> {
        search::search_notes(self.notes.folders(), query)
    }

    // --- periodic work ---

    /// Drives all deadline-based behavior for the given instant.
    ///
    /// Fired reminders become toasts; the host reads them back through
    /// [`Self::toasts`].
    pub fn tick(&mut self, now_ms: i64) -> SessionResult<SessionTick> {
        let autosave = self.notes.tick(&mut self.store, now_ms)?;
        let reminders = self
            .scanner
            .poll(&mut self.todos, &mut self.store, now_ms)?;
        for event in &reminders {
            self.notifications
                .push(REMINDER_TOAST_TITLE, &event.text, now_ms);
        }
        let toasts_expired = self.notifications.prune(now_ms);

        Ok(SessionTick {
            autosave,
            reminders,
            toasts_expired,
        })
    }

    /// Consumes the session, returning the store.
    pub fn into_store(mut self) -> SessionResult<S> {
        // Last chance for a pending edit to reach the store.
        let now = crate::clock::now_ms();
        self.notes.flush_pending(&mut self.store, now)?;
        Ok(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::AppSession;
    use crate::model::todo::{ReminderPolicy, HOUR_MS};
    use crate::model::view::View;
    use crate::notes::DEFAULT_FOLDER_NAME;
    use crate::store::MemoryStateStore;
    use crate::todos::REMINDER_SCAN_INTERVAL_MS;

    #[test]
    fn open_seeds_default_folder_and_notes_view() {
        let session = AppSession::open(MemoryStateStore::new()).expect("open should succeed");
        assert_eq!(session.active_view(), View::Notes);
        assert_eq!(session.folders().len(), 1);
        assert_eq!(session.folders()[0].name, DEFAULT_FOLDER_NAME);
        assert!(session.todos().is_empty());
    }

    #[test]
    fn active_view_survives_reopen() {
        let store = {
            let mut session = AppSession::open(MemoryStateStore::new()).expect("open");
            session
                .set_active_view(View::Pomodoro, 0)
                .expect("view switch should persist");
            session.into_store().expect("into_store")
        };

        let reopened = AppSession::open(store).expect("reopen");
        assert_eq!(reopened.active_view(), View::Pomodoro);
    }

    #[test]
    fn tick_turns_fired_reminders_into_toasts() {
        let mut session = AppSession::open(MemoryStateStore::new()).expect("open");
        let todo_id = session.add_todo("water the plants").expect("add");
        session
            .set_todo_due_date(todo_id, Some(2 * HOUR_MS))
            .expect("due date");
        session
            .set_todo_reminder(todo_id, ReminderPolicy::OneHourBefore)
            .expect("policy");

        let early = session.tick(30 * 60 * 1_000).expect("early tick");
        assert!(early.reminders.is_empty());
        assert!(session.toasts().is_empty());

        let at_reminder = session
            .tick(HOUR_MS + REMINDER_SCAN_INTERVAL_MS)
            .expect("reminder tick");
        assert_eq!(at_reminder.reminders.len(), 1);
        assert_eq!(session.toasts().len(), 1);
        assert_eq!(session.toasts()[0].title, "Reminder");
        assert_eq!(session.toasts()[0].body, "water the plants");
    }

    #[test]
    fn dashboard_and_search_read_live_state() {
        let mut session = AppSession::open(MemoryStateStore::new()).expect("open");
        session.add_note(1_000).expect("add note");
        session
            .edit_note_title("Grocery run", 1_000)
            .expect("title edit");
        session.flush_note_edit(2_000).expect("flush");

        let hits = session.search_notes(&crate::search::NoteQuery::new("grocery"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Grocery run");

        let snapshot = session.dashboard(crate::clock::now_ms());
        assert_eq!(snapshot.recent_notes.len(), 1);
    }
}
