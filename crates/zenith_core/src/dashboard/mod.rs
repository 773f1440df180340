//! Dashboard read models derived from loaded state.
//!
//! # Responsibility
//! - Project "tasks due today" and "recent notes" summary cards.
//!
//! # Invariants
//! - "Today" means the local calendar day containing `now`, bounded by
//!   local midnights (DST-safe: next-day midnight, not start + 24 h).
//! - Projections are pure; nothing here is persisted.

use crate::model::note::{Folder, FolderId, NoteId};
use crate::model::todo::Todo;
use chrono::{Local, TimeZone};
use log::warn;

/// How many notes the recent-notes card shows.
pub const RECENT_NOTES_LIMIT: usize = 3;

/// Note annotated with its owning folder for cross-folder lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentNote {
    pub note_id: NoteId,
    pub folder_id: FolderId,
    pub folder_name: String,
    pub title: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Both dashboard cards in one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub due_today: Vec<Todo>,
    pub recent_notes: Vec<RecentNote>,
}

/// Builds both dashboard cards.
pub fn snapshot(folders: &[Folder], todos: &[Todo], now_ms: i64) -> DashboardSnapshot {
    DashboardSnapshot {
        due_today: due_today(todos, now_ms),
        recent_notes: recent_notes(folders, RECENT_NOTES_LIMIT),
    }
}

/// Incomplete todos whose due date falls inside the local calendar day
/// containing `now_ms`.
pub fn due_today(todos: &[Todo], now_ms: i64) -> Vec<Todo> {
    let Some((day_start, next_day_start)) = local_day_bounds(now_ms) else {
        warn!("event=day_bounds_unresolved module=dashboard status=recovered now_ms={now_ms}");
        return Vec::new();
    };

    todos
        .iter()
        .filter(|todo| !todo.completed)
        .filter(|todo| {
            todo.due_date
                .is_some_and(|due| due >= day_start && due < next_day_start)
        })
        .cloned()
        .collect()
}

/// Notes across all folders, newest first, truncated to `limit`.
pub fn recent_notes(folders: &[Folder], limit: usize) -> Vec<RecentNote> {
    let mut notes: Vec<RecentNote> = folders
        .iter()
        .flat_map(|folder| {
            folder.notes.iter().map(|note| RecentNote {
                note_id: note.id,
                folder_id: folder.id,
                folder_name: folder.name.clone(),
                title: note.title.clone(),
                created_at: note.created_at,
            })
        })
        .collect();

    notes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.note_id.cmp(&b.note_id))
    });
    notes.truncate(limit);
    notes
}

/// `[local midnight, next local midnight)` around `now_ms`.
fn local_day_bounds(now_ms: i64) -> Option<(i64, i64)> {
    let now = Local.timestamp_millis_opt(now_ms).single()?;
    let day = now.date_naive();

    let start = day
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()?
        .timestamp_millis();
    let next_start = day
        .succ_opt()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()?
        .timestamp_millis();
    Some((start, next_start))
}

#[cfg(test)]
mod tests {
    use super::{due_today, recent_notes, snapshot, RECENT_NOTES_LIMIT};
    use crate::clock::now_ms;
    use crate::model::note::{Folder, Note};
    use crate::model::todo::{Todo, DAY_MS, HOUR_MS};

    fn todo_due(text: &str, due_ms: i64) -> Todo {
        let mut todo = Todo::new(text);
        todo.due_date = Some(due_ms);
        todo
    }

    #[test]
    fn due_today_keeps_only_incomplete_todos_due_this_local_day() {
        let now = now_ms();
        let mut done_today = todo_due("done", now);
        done_today.completed = true;

        let todos = vec![
            todo_due("due now", now),
            todo_due("due in two days", now + 2 * DAY_MS),
            todo_due("overdue since last week", now - 7 * DAY_MS),
            done_today,
            Todo::new("no due date"),
        ];

        let due = due_today(&todos, now);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].text, "due now");
    }

    #[test]
    fn recent_notes_are_newest_first_across_folders_and_truncated() {
        let mut work = Folder::new("Work");
        let mut home = Folder::new("Home");
        for (i, title) in ["a", "b"].iter().enumerate() {
            work.notes.push(Note::new(*title, (i as i64 + 1) * HOUR_MS));
        }
        for (i, title) in ["c", "d"].iter().enumerate() {
            home.notes.push(Note::new(*title, (i as i64 + 3) * HOUR_MS));
        }

        let recent = recent_notes(&[work, home], RECENT_NOTES_LIMIT);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].title, "d");
        assert_eq!(recent[0].folder_name, "Home");
        assert_eq!(recent[1].title, "c");
        assert_eq!(recent[2].title, "b");
    }

    #[test]
    fn snapshot_bundles_both_cards() {
        let now = now_ms();
        let mut folder = Folder::new("Work");
        folder.notes.push(Note::new("Plan", now));

        let bundle = snapshot(&[folder], &[todo_due("ship", now)], now);
        assert_eq!(bundle.due_today.len(), 1);
        assert_eq!(bundle.recent_notes.len(), 1);
    }
}
