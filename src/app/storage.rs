// wfh-tracker - app/storage.rs
//
// Persistence codec: the canonical at-rest shape is a single JSON array of
// `{name, elapsedTime, hourlyRate}` objects in one well-known file.
//
// Design principles:
// - Saves are atomic (write→temp, rename→final) so a crash during a save
//   never corrupts the previous good data.
// - Load errors are absorbed: a missing, unreadable, malformed, or
//   structurally invalid file resets the store to empty rather than
//   surfacing an error. There is no partial recovery — the file either
//   validates as a whole or the collection starts fresh.
// - Save errors are returned as descriptive strings for the caller to log;
//   autosave runs on every mutation and has no user-facing error channel.

use crate::core::model::{PersistedProject, Project};
use crate::util::constants::STORAGE_FILE_NAME;
use std::path::{Path, PathBuf};

/// Resolve the storage file path from the platform data directory.
pub fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_FILE_NAME)
}

/// Save the collection to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed. Returns a descriptive error
/// string suitable for a tracing warn! call; the caller decides whether to
/// surface it (typically it is logged and ignored).
pub fn save(projects: &[Project], path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create storage directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let persisted: Vec<PersistedProject> = projects.iter().map(Project::to_persisted).collect();
    let json = serde_json::to_string(&persisted)
        .map_err(|e| format!("failed to serialise projects: {e}"))?;

    // Atomic write: write to a sibling temp file then rename.
    // A crash between write and rename loses the new snapshot but never
    // corrupts the previous one (rename is atomic on all supported platforms).
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write storage temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise storage file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), projects = projects.len(), "Projects saved");
    Ok(())
}

/// Load the collection from `path`.
///
/// Returns an empty collection on any failure: file not found (normal first
/// run), read error, JSON syntax error, a non-array top level, or any entry
/// failing structural validation (non-string name, negative or fractional
/// elapsedTime). Corruption is non-fatal and resets the whole store.
pub fn load(path: &Path) -> Vec<Project> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            // Distinguish "file not found" (normal first run) from other errors.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read storage file — starting fresh");
            }
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<PersistedProject>>(&content) {
        Ok(persisted) => {
            tracing::info!(path = %path.display(), projects = persisted.len(), "Projects loaded");
            persisted.into_iter().map(Project::from).collect()
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Storage file is malformed — starting fresh"
            );
            Vec::new()
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_projects() -> Vec<Project> {
        let mut a = Project::with_elapsed("A", 3661);
        a.set_hourly_rate(75.0);
        vec![a, Project::with_elapsed("B, with comma", 0)]
    }

    /// Save then load reproduces the same (name, elapsed, rate) sequence,
    /// order preserved.
    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(dir.path());
        let original = sample_projects();

        save(&original, &path).expect("save should succeed");
        let loaded = load(&path);

        assert_eq!(loaded, original);
    }

    /// The on-disk form is the canonical flat array, not an envelope.
    #[test]
    fn test_canonical_on_disk_shape() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(dir.path());
        save(&sample_projects(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let array = value.as_array().expect("top level must be an array");
        assert_eq!(array[0]["name"], "A");
        assert_eq!(array[0]["elapsedTime"], 3661);
        assert_eq!(array[0]["hourlyRate"], 75.0);
    }

    /// A missing file is a normal first run: empty collection, no error.
    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load(&storage_path(dir.path())).is_empty());
    }

    /// Malformed JSON resets to empty rather than panicking or erroring.
    #[test]
    fn test_load_malformed_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(dir.path());
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_empty());
    }

    /// A non-array top level is corrupt: whole store resets.
    #[test]
    fn test_load_non_array_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(dir.path());
        std::fs::write(&path, br#"{"name":"A","elapsedTime":1}"#).unwrap();
        assert!(load(&path).is_empty());
    }

    /// Load applies the same structural checks as import: one invalid entry
    /// (negative elapsedTime) marks the whole file corrupt.
    #[test]
    fn test_load_invalid_entry_resets_whole_store() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(dir.path());
        std::fs::write(
            &path,
            br#"[{"name":"A","elapsedTime":5},{"name":"B","elapsedTime":-2}]"#,
        )
        .unwrap();
        assert!(load(&path).is_empty());
    }

    /// Data from older releases without hourlyRate still loads (rate 0).
    #[test]
    fn test_load_legacy_shape_without_rate() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(dir.path());
        std::fs::write(&path, br#"[{"name":"A","elapsedTime":42}]"#).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].elapsed_seconds, 42);
        assert_eq!(loaded[0].hourly_rate, 0.0);
    }

    /// A leftover temp file from a crashed save must not corrupt a new save.
    #[test]
    fn test_save_atomic_survives_leftover_temp() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(dir.path());

        save(&sample_projects(), &path).unwrap();
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let updated = vec![Project::with_elapsed("New", 7)];
        save(&updated, &path).unwrap();
        assert_eq!(load(&path), updated);
    }
}
