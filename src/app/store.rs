// wfh-tracker - app/store.rs
//
// The project store: owner of the ordered collection and the timer
// controller, and the single place where mutations happen.
//
// Persistence is write-through: every structural mutation (add/delete/
// reorder/replace) and every timer-driven elapsed or rate mutation
// re-serialises the entire collection to storage. No debouncing — a timer
// tick writes too. Save failures are logged and swallowed; autosave has no
// user-facing error channel.

use crate::app::storage;
use crate::app::timer::{TimerController, TimerState};
use crate::core::model::Project;
use std::path::PathBuf;
use std::time::Instant;

/// Ordered project collection with exclusive-timer control and
/// write-through persistence.
#[derive(Debug)]
pub struct ProjectStore {
    projects: Vec<Project>,
    timer: TimerController,
    storage_path: PathBuf,
}

impl ProjectStore {
    /// Hydrate the store from `storage_path`. Absent or corrupt storage
    /// yields an empty collection (handled inside the storage layer).
    pub fn open(storage_path: PathBuf) -> Self {
        let projects = storage::load(&storage_path);
        Self {
            projects,
            timer: TimerController::new(),
            storage_path,
        }
    }

    /// Read access to the collection, in user order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Timer state of the project at `index`.
    pub fn timer_state(&self, index: usize) -> TimerState {
        self.timer.state(index)
    }

    /// The running project, if any.
    pub fn running_project(&self) -> Option<&Project> {
        self.timer.running_index().map(|i| &self.projects[i])
    }

    /// Index of the first project whose name matches exactly (case-sensitive).
    pub fn find(&self, name: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.name == name)
    }

    // -------------------------------------------------------------------------
    // Structural mutations
    // -------------------------------------------------------------------------

    /// Append a new project with no time recorded.
    pub fn add(&mut self, name: impl Into<String>) {
        self.projects.push(Project::new(name));
        self.persist();
    }

    /// Remove the first project with a matching name. Silent no-op when
    /// nothing matches. Deleting the running project stops its timer first
    /// so the final elapsed value is written before the record goes away.
    pub fn delete(&mut self, name: &str, now: Instant) {
        let Some(index) = self.find(name) else {
            tracing::debug!(name, "Delete requested for unknown project — ignoring");
            return;
        };

        if self.timer.running_index() == Some(index) {
            self.timer.stop(&mut self.projects, now);
        }
        self.timer.project_removed(index);
        self.projects.remove(index);
        self.persist();
    }

    /// Move one project from `from` to `to`, preserving the relative order
    /// of all others. Out-of-range or same-position moves are no-ops.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.projects.len() || to >= self.projects.len() {
            return;
        }
        let project = self.projects.remove(from);
        self.projects.insert(to, project);
        self.timer.project_moved(from, to);
        self.persist();
    }

    /// Replace the whole collection (import restore semantics). The running
    /// timer is stopped first; the imported set persists immediately.
    pub fn replace_all(&mut self, projects: Vec<Project>, now: Instant) {
        self.timer.stop(&mut self.projects, now);
        self.projects = projects;
        self.persist();
    }

    // -------------------------------------------------------------------------
    // Record mutations
    // -------------------------------------------------------------------------

    /// Set the hourly rate on the named project (clamped at zero).
    /// Returns false when no project matches.
    pub fn set_hourly_rate(&mut self, name: &str, rate: f64) -> bool {
        let Some(index) = self.find(name) else {
            return false;
        };
        self.projects[index].set_hourly_rate(rate);
        self.persist();
        true
    }

    // -------------------------------------------------------------------------
    // Timer operations
    // -------------------------------------------------------------------------

    /// Start tracking the named project, stopping whichever timer was
    /// running first. Returns false when no project matches.
    pub fn start(&mut self, name: &str, now: Instant) -> bool {
        let Some(index) = self.find(name) else {
            return false;
        };
        self.timer.start(&mut self.projects, index, now);
        self.persist();
        true
    }

    /// Advance the running timer from the wall clock and persist the new
    /// count. No-op when idle.
    pub fn tick(&mut self, now: Instant) {
        if self.timer.tick(&mut self.projects, now).is_some() {
            self.persist();
        }
    }

    /// Stop the running timer, if any, and persist its final value.
    /// Returns the name of the project that was stopped.
    pub fn stop(&mut self, now: Instant) -> Option<String> {
        let index = self.timer.stop(&mut self.projects, now)?;
        self.persist();
        Some(self.projects[index].name.clone())
    }

    /// Stop (if running) and zero the named project's counter.
    /// Returns false when no project matches.
    pub fn reset(&mut self, name: &str, now: Instant) -> bool {
        let Some(index) = self.find(name) else {
            return false;
        };
        self.timer.reset(&mut self.projects, index, now);
        self.persist();
        true
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Write-through save of the full collection. Errors are logged, never
    /// propagated.
    fn persist(&self) {
        if let Err(e) = storage::save(&self.projects, &self.storage_path) {
            tracing::warn!(error = %e, "Autosave failed — continuing with in-memory state");
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ProjectStore {
        ProjectStore::open(storage::storage_path(dir.path()))
    }

    fn names(store: &ProjectStore) -> Vec<&str> {
        store.projects().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add("A");
        store.add("B");
        store.add("A");
        assert_eq!(names(&store), vec!["A", "B", "A"]);
    }

    /// Delete removes only the first case-sensitive match and is a silent
    /// no-op for unknown names.
    #[test]
    fn test_delete_first_match_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let now = Instant::now();
        store.add("A");
        store.add("a");
        store.add("A");

        store.delete("A", now);
        assert_eq!(names(&store), vec!["a", "A"]);

        store.delete("missing", now);
        store.delete("a ", now);
        assert_eq!(names(&store), vec!["a", "A"]);
    }

    #[test]
    fn test_reorder_preserves_relative_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        for name in ["A", "B", "C", "D"] {
            store.add(name);
        }

        store.reorder(0, 2);
        assert_eq!(names(&store), vec!["B", "C", "A", "D"]);

        store.reorder(3, 0);
        assert_eq!(names(&store), vec!["D", "B", "C", "A"]);

        // Out-of-range moves are no-ops.
        store.reorder(9, 0);
        store.reorder(0, 9);
        assert_eq!(names(&store), vec!["D", "B", "C", "A"]);
    }

    /// Every mutation is written through: a second store opened on the same
    /// path sees the change immediately.
    #[test]
    fn test_write_through_persistence() {
        let dir = TempDir::new().unwrap();
        let path = storage::storage_path(dir.path());
        let mut store = ProjectStore::open(path.clone());

        store.add("A");
        assert_eq!(names(&ProjectStore::open(path.clone())), vec!["A"]);

        store.set_hourly_rate("A", 60.0);
        assert_eq!(ProjectStore::open(path.clone()).projects()[0].hourly_rate, 60.0);

        let now = Instant::now();
        store.start("A", now);
        store.tick(now + Duration::from_secs(2));
        assert_eq!(
            ProjectStore::open(path.clone()).projects()[0].elapsed_seconds,
            2,
            "each tick must reach storage"
        );

        store.delete("A", now + Duration::from_secs(3));
        assert!(ProjectStore::open(path).projects().is_empty());
    }

    /// Deleting the running project stops its timer; the handle never
    /// dangles onto a neighbouring record.
    #[test]
    fn test_delete_running_project_stops_timer() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let now = Instant::now();
        store.add("A");
        store.add("B");

        store.start("A", now);
        store.delete("A", now + Duration::from_secs(1));

        assert!(store.running_project().is_none());
        assert_eq!(store.projects()[0].elapsed_seconds, 0, "B untouched");
    }

    /// The running handle follows its project through a reorder.
    #[test]
    fn test_reorder_keeps_running_handle_attached() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let now = Instant::now();
        for name in ["A", "B", "C"] {
            store.add(name);
        }

        store.start("C", now);
        store.reorder(2, 0);
        assert_eq!(store.running_project().unwrap().name, "C");

        store.tick(now + Duration::from_secs(4));
        assert_eq!(store.projects()[0].elapsed_seconds, 4);
    }

    /// Import-replace swaps the whole collection atomically and stops any
    /// running timer first.
    #[test]
    fn test_replace_all() {
        let dir = TempDir::new().unwrap();
        let path = storage::storage_path(dir.path());
        let mut store = ProjectStore::open(path.clone());
        let now = Instant::now();
        store.add("Old");
        store.start("Old", now);

        store.replace_all(
            vec![Project::with_elapsed("New", 9)],
            now + Duration::from_secs(1),
        );

        assert!(store.running_project().is_none());
        assert_eq!(names(&store), vec!["New"]);
        assert_eq!(names(&ProjectStore::open(path)), vec!["New"]);
    }

    /// Unknown names are reported, not panicked on.
    #[test]
    fn test_operations_on_unknown_names() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let now = Instant::now();
        assert!(!store.start("ghost", now));
        assert!(!store.reset("ghost", now));
        assert!(!store.set_hourly_rate("ghost", 10.0));
        assert!(store.stop(now).is_none());
    }
}
