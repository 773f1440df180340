//! To-do use-case service.
//!
//! # Responsibility
//! - Provide todo/subtask create, edit, toggle, delete and reorder
//!   operations over the `todos` binding.
//! - Scan for due reminders and persist the fired flag.
//!
//! # Invariants
//! - Todo text is trimmed and never blank.
//! - List order is caller-controlled (drag-and-drop); operations keep
//!   relative order stable.

use crate::model::todo::{Priority, ReminderPolicy, Subtask, SubtaskId, Todo, TodoId};
use crate::store::{keys, StateStore, StoreBinding, StoreError};
use crate::todos::reminder::ReminderEvent;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoResult<T> = Result<T, TodoError>;

/// Errors from todo operations.
#[derive(Debug)]
pub enum TodoError {
    /// Todo or subtask text is blank after trim.
    BlankText,
    /// Target todo does not exist.
    TodoNotFound(TodoId),
    /// Target subtask does not exist in the given todo.
    SubtaskNotFound {
        todo_id: TodoId,
        subtask_id: SubtaskId,
    },
    /// Store-layer failure.
    Store(StoreError),
}

impl Display for TodoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "text must not be blank"),
            Self::TodoNotFound(id) => write!(f, "todo not found: {id}"),
            Self::SubtaskNotFound {
                todo_id,
                subtask_id,
            } => write!(f, "subtask {subtask_id} not found in todo {todo_id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TodoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// To-do service over the `todos` store key.
pub struct TodoService {
    todos: StoreBinding<Vec<Todo>>,
}

impl TodoService {
    /// Loads the todo collection from the store.
    pub fn load<S: StateStore>(store: &S) -> TodoResult<Self> {
        let todos = StoreBinding::load(store, keys::TODOS, Vec::new())?;
        Ok(Self { todos })
    }

    pub fn todos(&self) -> &[Todo] {
        self.todos.get()
    }

    /// Appends a new open todo.
    pub fn add<S: StateStore>(&mut self, store: &mut S, text: &str) -> TodoResult<TodoId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::BlankText);
        }

        let todo = Todo::new(text);
        let todo_id = todo.id;
        self.todos.update(store, |todos| todos.push(todo))?;
        Ok(todo_id)
    }

    /// Flips the completed flag.
    pub fn toggle<S: StateStore>(&mut self, store: &mut S, todo_id: TodoId) -> TodoResult<()> {
        self.edit(store, todo_id, |todo| todo.completed = !todo.completed)
    }

    /// Removes a todo (and its subtasks with it).
    pub fn remove<S: StateStore>(&mut self, store: &mut S, todo_id: TodoId) -> TodoResult<()> {
        self.require(todo_id)?;
        self.todos
            .update(store, |todos| todos.retain(|todo| todo.id != todo_id))?;
        Ok(())
    }

    /// Replaces the todo text.
    pub fn set_text<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        text: &str,
    ) -> TodoResult<()> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(TodoError::BlankText);
        }
        self.edit(store, todo_id, |todo| todo.text = text)
    }

    pub fn set_priority<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        priority: Priority,
    ) -> TodoResult<()> {
        self.edit(store, todo_id, |todo| todo.priority = priority)
    }

    /// Replaces the due date and re-arms the reminder.
    pub fn set_due_date<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        due_ms: Option<i64>,
    ) -> TodoResult<()> {
        self.edit(store, todo_id, |todo| {
            todo.due_date = due_ms;
            todo.reminder_triggered = false;
        })
    }

    /// Replaces the reminder policy and re-arms the reminder.
    pub fn set_reminder_policy<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        policy: ReminderPolicy,
    ) -> TodoResult<()> {
        self.edit(store, todo_id, |todo| {
            todo.reminder = policy;
            todo.reminder_triggered = false;
        })
    }

    /// Moves a todo to a new position (drag-and-drop reorder).
    ///
    /// The target index is clamped to the end of the list.
    pub fn move_todo<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        new_index: usize,
    ) -> TodoResult<()> {
        self.require(todo_id)?;
        self.todos.update(store, |todos| {
            if let Some(from) = todos.iter().position(|todo| todo.id == todo_id) {
                let todo = todos.remove(from);
                let to = new_index.min(todos.len());
                todos.insert(to, todo);
            }
        })?;
        Ok(())
    }

    /// Appends a subtask to a todo.
    pub fn add_subtask<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        text: &str,
    ) -> TodoResult<SubtaskId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::BlankText);
        }

        let subtask = Subtask::new(text);
        let subtask_id = subtask.id;
        self.edit(store, todo_id, |todo| todo.subtasks.push(subtask))?;
        Ok(subtask_id)
    }

    /// Flips a subtask's completed flag.
    pub fn toggle_subtask<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        subtask_id: SubtaskId,
    ) -> TodoResult<()> {
        self.require_subtask(todo_id, subtask_id)?;
        self.edit(store, todo_id, |todo| {
            if let Some(subtask) = todo.subtask_mut(subtask_id) {
                subtask.completed = !subtask.completed;
            }
        })
    }

    /// Removes a subtask from a todo.
    pub fn remove_subtask<S: StateStore>(
        &mut self,
        store: &mut S,
        todo_id: TodoId,
        subtask_id: SubtaskId,
    ) -> TodoResult<()> {
        self.require_subtask(todo_id, subtask_id)?;
        self.edit(store, todo_id, |todo| {
            todo.subtasks.retain(|subtask| subtask.id != subtask_id)
        })
    }

    /// Scans for due reminders, marks them fired and persists the
    /// flags in one write.
    ///
    /// Eligible: incomplete, not yet triggered, due date present,
    /// policy other than `none`, and `now >= reminder instant`
    /// (inclusive).
    pub fn scan_due_reminders<S: StateStore>(
        &mut self,
        store: &mut S,
        now_ms: i64,
    ) -> TodoResult<Vec<ReminderEvent>> {
        let fired: Vec<ReminderEvent> = self
            .todos
            .get()
            .iter()
            .filter(|todo| !todo.completed && !todo.reminder_triggered)
            .filter_map(|todo| match (todo.due_date, todo.reminder_at()) {
                (Some(due_at), Some(reminder_at)) if now_ms >= reminder_at => {
                    Some(ReminderEvent {
                        todo_id: todo.id,
                        text: todo.text.clone(),
                        due_at,
                        reminder_at,
                    })
                }
                _ => None,
            })
            .collect();

        if !fired.is_empty() {
            self.todos.update(store, |todos| {
                for event in &fired {
                    if let Some(todo) = todos.iter_mut().find(|todo| todo.id == event.todo_id) {
                        todo.reminder_triggered = true;
                    }
                }
            })?;
            info!(
                "event=reminder_fired module=todos status=ok count={}",
                fired.len()
            );
        }

        Ok(fired)
    }

    fn require(&self, todo_id: TodoId) -> TodoResult<()> {
        if self.todos.get().iter().any(|todo| todo.id == todo_id) {
            return Ok(());
        }
        Err(TodoError::TodoNotFound(todo_id))
    }

    fn require_subtask(&self, todo_id: TodoId, subtask_id: SubtaskId) -> TodoResult<()> {
        let todo = self
            .todos
            .get()
            .iter()
            .find(|todo| todo.id == todo_id)
            .ok_or(TodoError::TodoNotFound(todo_id))?;
        if todo.subtasks.iter().any(|subtask| subtask.id == subtask_id) {
            return Ok(());
        }
        Err(TodoError::SubtaskNotFound {
            todo_id,
            subtask_id,
        })
    }

    fn edit<S, F>(&mut self, store: &mut S, todo_id: TodoId, apply: F) -> TodoResult<()>
    where
        S: StateStore,
        F: FnOnce(&mut Todo),
    {
        self.require(todo_id)?;
        self.todos.update(store, |todos| {
            if let Some(todo) = todos.iter_mut().find(|todo| todo.id == todo_id) {
                apply(todo);
            }
        })?;
        Ok(())
    }
}
