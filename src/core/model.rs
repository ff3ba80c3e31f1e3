// wfh-tracker - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.

use serde::{Deserialize, Serialize};

/// Number of seconds in one hour, used for earnings derivation.
const SECONDS_PER_HOUR: f64 = 3600.0;

// =============================================================================
// Project (in-memory record)
// =============================================================================

/// A single tracked project: the core entity that flows through the store,
/// the timer, persistence, and export.
///
/// `elapsed_seconds` is the authoritative counter of time worked; being a
/// `u64` it is non-negative by construction. A project's identity for store
/// operations is its `name` (first match, case-sensitive) — uniqueness is
/// not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Display name; treated as an opaque string by import/export.
    pub name: String,

    /// Total seconds worked on this project.
    pub elapsed_seconds: u64,

    /// Hourly rate in currency units; never negative.
    pub hourly_rate: f64,
}

impl Project {
    /// Create a fresh project with no time recorded and no rate set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elapsed_seconds: 0,
            hourly_rate: 0.0,
        }
    }

    /// Create a project with an existing elapsed-seconds count (used when
    /// rehydrating from storage or an imported file).
    pub fn with_elapsed(name: impl Into<String>, elapsed_seconds: u64) -> Self {
        Self {
            name: name.into(),
            elapsed_seconds,
            hourly_rate: 0.0,
        }
    }

    /// Overwrite the elapsed counter.
    pub fn set_elapsed(&mut self, seconds: u64) {
        self.elapsed_seconds = seconds;
    }

    /// Add to the elapsed counter.
    pub fn add_elapsed(&mut self, delta: u64) {
        self.elapsed_seconds += delta;
    }

    /// Set the hourly rate, clamping negative input to 0.
    pub fn set_hourly_rate(&mut self, rate: f64) {
        self.hourly_rate = if rate < 0.0 { 0.0 } else { rate };
    }

    /// Earnings derived from time worked: `elapsed / 3600 * rate`.
    /// No rounding — the display layer rounds for presentation only.
    pub fn earnings(&self) -> f64 {
        self.elapsed_seconds as f64 / SECONDS_PER_HOUR * self.hourly_rate
    }

    /// Pure projection to the flat at-rest shape.
    pub fn to_persisted(&self) -> PersistedProject {
        PersistedProject {
            name: self.name.clone(),
            elapsed_time: self.elapsed_seconds,
            hourly_rate: self.hourly_rate,
        }
    }
}

// =============================================================================
// PersistedProject (canonical storage / interchange shape)
// =============================================================================

/// The canonical flat shape used for at-rest persistence and as the minimal
/// JSON interchange format: `{"name": ..., "elapsedTime": ..., "hourlyRate": ...}`.
///
/// `elapsedTime` deserialises through `u64`, so a negative or fractional
/// value in a storage file fails deserialisation and the loader treats the
/// whole file as corrupt — the same structural rules the import decoder
/// applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedProject {
    pub name: String,

    #[serde(rename = "elapsedTime")]
    pub elapsed_time: u64,

    /// Absent in data written by older releases; defaults to 0.
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: f64,
}

impl From<PersistedProject> for Project {
    fn from(p: PersistedProject) -> Self {
        let mut project = Project::with_elapsed(p.name, p.elapsed_time);
        project.set_hourly_rate(p.hourly_rate);
        project
    }
}

// =============================================================================
// Unit tests
// =============================================================================
