//! Folder/note workspace service.
//!
//! # Responsibility
//! - Provide folder/note create, delete and selection operations over
//!   the `notes_folders`, `selected_folder_id` and `selected_note_id`
//!   bindings.
//! - Drive the autosave machine and commit the edit buffer.
//!
//! # Invariants
//! - `add_note` requires a selected folder.
//! - Deleting the selected folder clears the note selection and falls
//!   back to the first remaining folder.
//! - Selection changes flush a pending edit before resetting the
//!   buffer; only explicit deletes drop pending edits.

use crate::model::note::{Folder, FolderId, Note, NoteId};
use crate::notes::autosave::{AutosaveMachine, AutosavePhase, AutosaveStep};
use crate::store::{keys, StateStore, StoreBinding, StoreError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Folder seeded on first launch when the store holds no folders.
pub const DEFAULT_FOLDER_NAME: &str = "My First Folder";

/// Title given to freshly created notes.
const NEW_NOTE_TITLE: &str = "New Note";

pub type NotesResult<T> = Result<T, NotesError>;

/// Errors from workspace operations.
#[derive(Debug)]
pub enum NotesError {
    /// Folder name is blank after trim.
    BlankFolderName,
    /// Operation requires a selected folder.
    NoFolderSelected,
    /// Operation requires a selected note.
    NoteNotSelected,
    /// Target folder does not exist.
    FolderNotFound(FolderId),
    /// Target note does not exist in the selected folder.
    NoteNotFound(NoteId),
    /// Store-layer failure.
    Store(StoreError),
}

impl Display for NotesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankFolderName => write!(f, "folder name must not be blank"),
            Self::NoFolderSelected => write!(f, "no folder is selected"),
            Self::NoteNotSelected => write!(f, "no note is selected"),
            Self::FolderNotFound(id) => write!(f, "folder not found: {id}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NotesError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Uncommitted editor state for the selected note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    pub note_id: NoteId,
    pub title: String,
    pub content: String,
}

impl EditorBuffer {
    fn from_note(note: &Note) -> Self {
        Self {
            note_id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }
}

/// Workspace service over the notes store keys.
pub struct NotesWorkspace {
    folders: StoreBinding<Vec<Folder>>,
    selected_folder_id: StoreBinding<Option<FolderId>>,
    selected_note_id: StoreBinding<Option<NoteId>>,
    buffer: Option<EditorBuffer>,
    autosave: AutosaveMachine,
}

impl NotesWorkspace {
    /// Loads workspace state from the store.
    ///
    /// Seeds one default folder when the store holds none, and repairs
    /// stale selections left behind by older state.
    pub fn load<S: StateStore>(store: &mut S) -> NotesResult<Self> {
        let folders = StoreBinding::load(
            store,
            keys::NOTES_FOLDERS,
            vec![Folder::new(DEFAULT_FOLDER_NAME)],
        )?;
        let mut selected_folder_id =
            StoreBinding::load(store, keys::SELECTED_FOLDER_ID, None)?;
        let mut selected_note_id = StoreBinding::load(store, keys::SELECTED_NOTE_ID, None)?;

        let folder_valid = selected_folder_id
            .get()
            .is_some_and(|id| folders.get().iter().any(|folder| folder.id == id));
        if !folder_valid {
            let fallback = folders.get().first().map(|folder| folder.id);
            selected_folder_id.set(store, fallback)?;
            selected_note_id.set(store, None)?;
        }

        let note_valid = match (*selected_folder_id.get(), *selected_note_id.get()) {
            (Some(folder_id), Some(note_id)) => folders
                .get()
                .iter()
                .find(|folder| folder.id == folder_id)
                .is_some_and(|folder| folder.note(note_id).is_some()),
            (_, None) => true,
            (None, Some(_)) => false,
        };
        if !note_valid {
            selected_note_id.set(store, None)?;
        }

        let mut workspace = Self {
            folders,
            selected_folder_id,
            selected_note_id,
            buffer: None,
            autosave: AutosaveMachine::new(),
        };
        workspace.buffer = workspace.selected_note().map(EditorBuffer::from_note);
        Ok(workspace)
    }

    pub fn folders(&self) -> &[Folder] {
        self.folders.get()
    }

    pub fn selected_folder_id(&self) -> Option<FolderId> {
        *self.selected_folder_id.get()
    }

    pub fn selected_note_id(&self) -> Option<NoteId> {
        *self.selected_note_id.get()
    }

    pub fn selected_folder(&self) -> Option<&Folder> {
        let folder_id = self.selected_folder_id()?;
        self.folders.get().iter().find(|folder| folder.id == folder_id)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        let note_id = self.selected_note_id()?;
        self.selected_folder()?.note(note_id)
    }

    /// Current editor buffer, if a note is selected.
    pub fn buffer(&self) -> Option<&EditorBuffer> {
        self.buffer.as_ref()
    }

    pub fn autosave_phase(&self) -> AutosavePhase {
        self.autosave.phase()
    }

    /// Creates a folder, selects it and clears the note selection.
    pub fn add_folder<S: StateStore>(
        &mut self,
        store: &mut S,
        name: &str,
        now_ms: i64,
    ) -> NotesResult<FolderId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NotesError::BlankFolderName);
        }

        self.flush_pending(store, now_ms)?;

        let folder = Folder::new(name);
        let folder_id = folder.id;
        self.folders.update(store, |folders| folders.push(folder))?;
        self.selected_folder_id.set(store, Some(folder_id))?;
        self.selected_note_id.set(store, None)?;
        self.buffer = None;
        self.autosave.reset();

        info!("event=folder_create module=notes status=ok folder_id={folder_id}");
        Ok(folder_id)
    }

    /// Deletes a folder and all contained notes.
    ///
    /// Confirmation is the caller's concern; deletion here is immediate
    /// and unrecoverable. Pending edits to a note inside the deleted
    /// folder are dropped with it.
    pub fn delete_folder<S: StateStore>(
        &mut self,
        store: &mut S,
        folder_id: FolderId,
    ) -> NotesResult<()> {
        if !self.folders.get().iter().any(|folder| folder.id == folder_id) {
            return Err(NotesError::FolderNotFound(folder_id));
        }

        let was_selected = self.selected_folder_id() == Some(folder_id);
        self.folders
            .update(store, |folders| folders.retain(|folder| folder.id != folder_id))?;

        if was_selected {
            let fallback = self.folders.get().first().map(|folder| folder.id);
            self.selected_folder_id.set(store, fallback)?;
            self.selected_note_id.set(store, None)?;
            self.buffer = None;
            self.autosave.reset();
        }

        info!("event=folder_delete module=notes status=ok folder_id={folder_id}");
        Ok(())
    }

    /// Creates an empty note at the front of the selected folder and
    /// selects it.
    pub fn add_note<S: StateStore>(&mut self, store: &mut S, now_ms: i64) -> NotesResult<NoteId> {
        let folder_id = self
            .selected_folder_id()
            .ok_or(NotesError::NoFolderSelected)?;

        self.flush_pending(store, now_ms)?;

        let note = Note::new(NEW_NOTE_TITLE, now_ms);
        let note_id = note.id;
        self.folders.update(store, |folders| {
            if let Some(folder) = folders.iter_mut().find(|folder| folder.id == folder_id) {
                folder.notes.insert(0, note);
            }
        })?;
        self.selected_note_id.set(store, Some(note_id))?;
        self.buffer = self.selected_note().map(EditorBuffer::from_note);
        self.autosave.reset();

        Ok(note_id)
    }

    /// Deletes a note from the selected folder.
    pub fn delete_note<S: StateStore>(&mut self, store: &mut S, note_id: NoteId) -> NotesResult<()> {
        let folder_id = self
            .selected_folder_id()
            .ok_or(NotesError::NoFolderSelected)?;
        let exists = self
            .selected_folder()
            .is_some_and(|folder| folder.note(note_id).is_some());
        if !exists {
            return Err(NotesError::NoteNotFound(note_id));
        }

        self.folders.update(store, |folders| {
            if let Some(folder) = folders.iter_mut().find(|folder| folder.id == folder_id) {
                folder.notes.retain(|note| note.id != note_id);
            }
        })?;

        if self.selected_note_id() == Some(note_id) {
            self.selected_note_id.set(store, None)?;
            self.buffer = None;
            self.autosave.reset();
        }

        Ok(())
    }

    /// Records a title keystroke into the edit buffer.
    pub fn edit_title(&mut self, value: &str, now_ms: i64) -> NotesResult<()> {
        let buffer = self.buffer.as_mut().ok_or(NotesError::NoteNotSelected)?;
        buffer.title = value.to_string();
        self.autosave.note_edited(now_ms);
        Ok(())
    }

    /// Records a content keystroke into the edit buffer.
    pub fn edit_content(&mut self, value: &str, now_ms: i64) -> NotesResult<()> {
        let buffer = self.buffer.as_mut().ok_or(NotesError::NoteNotSelected)?;
        buffer.content = value.to_string();
        self.autosave.note_edited(now_ms);
        Ok(())
    }

    /// Changes the selected note, flushing any pending edit first.
    pub fn select_note<S: StateStore>(
        &mut self,
        store: &mut S,
        note_id: Option<NoteId>,
        now_ms: i64,
    ) -> NotesResult<()> {
        if let Some(note_id) = note_id {
            let exists = self
                .selected_folder()
                .is_some_and(|folder| folder.note(note_id).is_some());
            if !exists {
                return Err(NotesError::NoteNotFound(note_id));
            }
        }

        self.flush_pending(store, now_ms)?;

        self.selected_note_id.set(store, note_id)?;
        self.buffer = self.selected_note().map(EditorBuffer::from_note);
        self.autosave.reset();
        Ok(())
    }

    /// Changes the selected folder, flushing any pending edit first.
    pub fn select_folder<S: StateStore>(
        &mut self,
        store: &mut S,
        folder_id: FolderId,
        now_ms: i64,
    ) -> NotesResult<()> {
        if !self.folders.get().iter().any(|folder| folder.id == folder_id) {
            return Err(NotesError::FolderNotFound(folder_id));
        }

        self.flush_pending(store, now_ms)?;

        self.selected_folder_id.set(store, Some(folder_id))?;
        self.selected_note_id.set(store, None)?;
        self.buffer = None;
        self.autosave.reset();
        Ok(())
    }

    /// Drives deadline-based autosave transitions.
    ///
    /// Commits the edit buffer when the debounce window has elapsed and
    /// returns the phase after this tick.
    pub fn tick<S: StateStore>(&mut self, store: &mut S, now_ms: i64) -> NotesResult<AutosavePhase> {
        if self.autosave.poll(now_ms) == AutosaveStep::Commit {
            self.commit_buffer(store, now_ms)?;
        }
        Ok(self.autosave.phase())
    }

    /// Commits a pending edit immediately, regardless of the window.
    pub fn flush_pending<S: StateStore>(&mut self, store: &mut S, now_ms: i64) -> NotesResult<()> {
        if self.buffer.is_some() && self.autosave.force_commit() {
            self.commit_buffer(store, now_ms)?;
        }
        Ok(())
    }

    fn commit_buffer<S: StateStore>(&mut self, store: &mut S, now_ms: i64) -> NotesResult<()> {
        let buffer = self.buffer.clone().ok_or(NotesError::NoteNotSelected)?;
        let folder_id = self
            .selected_folder_id()
            .ok_or(NotesError::NoFolderSelected)?;

        self.folders.update(store, |folders| {
            if let Some(note) = folders
                .iter_mut()
                .find(|folder| folder.id == folder_id)
                .and_then(|folder| folder.note_mut(buffer.note_id))
            {
                note.title = buffer.title.clone();
                note.content = buffer.content.clone();
                note.updated_at = now_ms;
            }
        })?;

        // Read-back check against the live buffer: another keystroke may
        // have landed between the commit decision and the write.
        let committed = self
            .selected_folder()
            .and_then(|folder| folder.note(buffer.note_id));
        match (committed, self.buffer.as_ref()) {
            (Some(note), Some(live))
                if note.title == live.title && note.content == live.content =>
            {
                self.autosave.commit_matched(now_ms);
                debug!(
                    "event=note_commit module=notes status=ok note_id={}",
                    buffer.note_id
                );
            }
            (Some(_), _) => self.autosave.commit_diverged(now_ms),
            (None, _) => return Err(NotesError::NoteNotFound(buffer.note_id)),
        }
        Ok(())
    }
}
