// Task store backed by a single JSON file

use crate::filter::StatusFilter;
use crate::models::Task;
use eyre::{Context, Result, eyre};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default backing file, relative to the working directory
pub const DEFAULT_FILE: &str = "todo.json";

/// Persistent collection of tasks
///
/// Every operation reads the whole file, and every mutation rewrites it in
/// full before returning. There is no locking between processes: two
/// concurrent invocations race and the last writer wins.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Bind a store to the given backing file
    ///
    /// Nothing is read or created until the first operation.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ========================================================================
    // Read
    // ========================================================================

    /// Load tasks in file order, keeping those that match `filter`
    ///
    /// A missing backing file is created empty and yields no tasks.
    pub fn load_all(&self, filter: StatusFilter) -> Result<Vec<Task>> {
        if !self.path.exists() {
            self.create_empty()?;
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("Failed to read task file {}", self.path.display()))?;

        if data.trim().is_empty() {
            debug!(file = ?self.path, "Task file is empty");
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(&data)
            .wrap_err_with(|| format!("Failed to parse task file {}", self.path.display()))?;
        let total = tasks.len();

        let tasks: Vec<Task> = tasks.into_iter().filter(|t| filter.matches(t)).collect();

        debug!(file = ?self.path, total, shown = tasks.len(), %filter, "Loaded tasks");
        Ok(tasks)
    }

    /// Next id to assign: one past the highest id present, or 0 when empty
    ///
    /// Fails when the highest id is already `u64::MAX`.
    pub fn next_id(tasks: &[Task]) -> Result<u64> {
        match tasks.iter().map(|t| t.id).max() {
            None => Ok(0),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| eyre!("No id left to assign (highest id is {})", max)),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a task and persist; returns the full collection
    pub fn add(&self, task: Task) -> Result<Vec<Task>> {
        let mut tasks = self.load_all(StatusFilter::All)?;
        debug!(id = task.id, "Adding task");
        tasks.push(task);
        self.persist(&tasks)?;
        Ok(tasks)
    }

    /// Set the done flag on the task with `id` and persist
    ///
    /// An unknown id leaves the collection untouched but still rewrites it.
    pub fn mark_done(&self, id: u64, done: bool) -> Result<Vec<Task>> {
        let mut tasks = self.load_all(StatusFilter::All)?;

        let mut matched = 0;
        for task in tasks.iter_mut().filter(|t| t.id == id) {
            task.done = done;
            matched += 1;
        }
        debug!(id, done, matched, "Marked task");

        self.persist(&tasks)?;
        Ok(tasks)
    }

    /// Drop the task with `id` and persist; unknown ids are a no-op
    pub fn remove(&self, id: u64) -> Result<Vec<Task>> {
        let mut tasks = self.load_all(StatusFilter::All)?;

        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        debug!(id, removed = before - tasks.len(), "Removed task");

        self.persist(&tasks)?;
        Ok(tasks)
    }

    /// Replace the backing file with `tasks`
    ///
    /// The collection is written to a sibling temp file and renamed into
    /// place, so the backing file always holds a complete collection.
    pub fn persist(&self, tasks: &[Task]) -> Result<()> {
        self.ensure_parent_dir()?;

        let tmp_path = self.tmp_path();
        let result = Self::write_tmp(&tmp_path, tasks).and_then(|()| {
            fs::rename(&tmp_path, &self.path)
                .wrap_err_with(|| format!("Failed to write task file {}", self.path.display()))
        });

        if let Err(e) = result {
            if tmp_path.is_file() {
                if let Err(rm) = fs::remove_file(&tmp_path) {
                    warn!(file = ?tmp_path, error = ?rm, "Failed to remove temp file");
                }
            }
            return Err(e);
        }

        debug!(file = ?self.path, count = tasks.len(), "Persisted tasks");
        Ok(())
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn write_tmp(tmp_path: &Path, tasks: &[Task]) -> Result<()> {
        let file =
            File::create(tmp_path).wrap_err_with(|| format!("Failed to create {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, tasks).context("Failed to serialize tasks")?;
        writeln!(writer).wrap_err_with(|| format!("Failed to write {}", tmp_path.display()))?;
        writer
            .flush()
            .wrap_err_with(|| format!("Failed to write {}", tmp_path.display()))?;
        writer
            .get_ref()
            .sync_all() // Ensure data is flushed to disk
            .wrap_err_with(|| format!("Failed to sync {}", tmp_path.display()))?;
        Ok(())
    }

    fn create_empty(&self) -> Result<()> {
        self.ensure_parent_dir()?;
        File::create(&self.path)
            .wrap_err_with(|| format!("Failed to create task file {}", self.path.display()))?;
        info!(file = ?self.path, "Created empty task file");
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent)
                    .wrap_err_with(|| format!("Failed to create directory {}", parent.display()))
            }
            _ => Ok(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
