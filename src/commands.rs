// Execute a configured action against the store

use crate::config::Action;
use crate::filter::StatusFilter;
use crate::models::Task;
use crate::store::TaskStore;
use chrono::{DateTime, FixedOffset};
use eyre::Result;
use tracing::debug;

/// Run `action` and return the tasks to display
///
/// `now` becomes the `updated_at` of a newly added task.
pub fn execute(store: &TaskStore, action: &Action, now: DateTime<FixedOffset>) -> Result<Vec<Task>> {
    debug!(file = ?store.path(), ?action, "Executing action");

    match action {
        Action::View { filter } => store.load_all(*filter),
        Action::Add { content, tag, due } => {
            let existing = store.load_all(StatusFilter::All)?;
            let id = TaskStore::next_id(&existing)?;
            store.add(Task::new(id, content.as_str(), tag.as_str(), *due, now))
        }
        Action::Complete { id } => store.mark_done(*id, true),
        Action::Delete { id } => store.remove(*id),
    }
}
