// wfh-tracker - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "wfh-tracker";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "wfh-tracker";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Storage
// =============================================================================

/// Storage file name for the persisted project collection, kept in the
/// platform data directory. The base name matches the storage key used by
/// the browser-based predecessor so migrated data is easy to recognise.
pub const STORAGE_FILE_NAME: &str = "wfhProjects.json";

// =============================================================================
// Timer
// =============================================================================

/// Interval between timer ticks while a project is being tracked (ms).
///
/// Elapsed time is derived from wall-clock deltas rather than tick counting,
/// so the tracked total stays correct even when individual ticks run late.
pub const TICK_INTERVAL_MS: u64 = 1_000;

// =============================================================================
// Export
// =============================================================================

/// Fixed CSV header row for exported data.
pub const CSV_EXPORT_HEADER: &str =
    "Project Name,Elapsed Time (HH:MM:SS),Elapsed Time (Seconds)";

/// Version stamp written into the JSON export envelope.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Prefix for generated export file names (`wfh-projects-YYYY-MM-DD.<ext>`).
pub const EXPORT_FILE_PREFIX: &str = "wfh-projects";

// =============================================================================
// Import
// =============================================================================

/// Declared MIME type accepted for JSON imports.
pub const MIME_JSON: &str = "application/json";

/// Declared MIME type accepted for CSV imports.
pub const MIME_CSV: &str = "text/csv";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
