//! Trailing-edge debounce machine for the note editor.
//!
//! # Responsibility
//! - Collapse rapid keystrokes into at most one commit per quiet
//!   window.
//! - Track the saved-indicator display window back to idle.
//!
//! # Invariants
//! - Every keystroke restarts the commit deadline; the commit fires
//!   only after a full window of inactivity.
//! - The machine is pure over injected `now_ms` timestamps and owns no
//!   real timers, so its lifetime is exactly its owner's.

/// Quiet window after the last keystroke before a commit fires.
pub const AUTOSAVE_DEBOUNCE_MS: i64 = 1_500;

/// How long the saved indicator shows before returning to idle.
pub const SAVED_DISPLAY_MS: i64 = 2_000;

/// Editor save-state as shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutosavePhase {
    /// No pending changes.
    #[default]
    Idle,
    /// Local buffer differs from the persisted note.
    Unsaved,
    /// A commit is being applied.
    Saving,
    /// Committed note matches the buffer; indicator window running.
    Saved,
}

/// Action requested from the owner on a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveStep {
    None,
    /// Commit the edit buffer to the note collection now.
    Commit,
}

/// Debounced-autosave state machine.
#[derive(Debug, Default)]
pub struct AutosaveMachine {
    phase: AutosavePhase,
    commit_due_at: Option<i64>,
    idle_due_at: Option<i64>,
}

impl AutosaveMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AutosavePhase {
        self.phase
    }

    /// Whether an uncommitted edit exists.
    pub fn has_pending(&self) -> bool {
        matches!(self.phase, AutosavePhase::Unsaved | AutosavePhase::Saving)
    }

    /// Records one keystroke, (re)starting the debounce window.
    pub fn note_edited(&mut self, now_ms: i64) {
        self.phase = AutosavePhase::Unsaved;
        self.commit_due_at = Some(now_ms + AUTOSAVE_DEBOUNCE_MS);
        self.idle_due_at = None;
    }

    /// Advances deadline-driven transitions.
    pub fn poll(&mut self, now_ms: i64) -> AutosaveStep {
        match self.phase {
            AutosavePhase::Unsaved if self.commit_due_at.is_some_and(|due| now_ms >= due) => {
                self.phase = AutosavePhase::Saving;
                self.commit_due_at = None;
                AutosaveStep::Commit
            }
            AutosavePhase::Saved if self.idle_due_at.is_some_and(|due| now_ms >= due) => {
                self.phase = AutosavePhase::Idle;
                self.idle_due_at = None;
                AutosaveStep::None
            }
            _ => AutosaveStep::None,
        }
    }

    /// The committed note matched the buffer; show the saved indicator.
    pub fn commit_matched(&mut self, now_ms: i64) {
        self.phase = AutosavePhase::Saved;
        self.idle_due_at = Some(now_ms + SAVED_DISPLAY_MS);
    }

    /// The buffer changed again during the commit; re-arm the window.
    pub fn commit_diverged(&mut self, now_ms: i64) {
        self.note_edited(now_ms);
    }

    /// Forces a commit step regardless of the remaining window.
    ///
    /// Used by flush-on-switch paths. Returns whether a pending edit
    /// existed.
    pub fn force_commit(&mut self) -> bool {
        if self.has_pending() {
            self.phase = AutosavePhase::Saving;
            self.commit_due_at = None;
            return true;
        }
        false
    }

    /// Drops all pending state back to idle without committing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
