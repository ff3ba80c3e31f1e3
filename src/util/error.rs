// wfh-tracker - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; user-facing messages are fixed here so
// the CLI (and any future UI) can display them verbatim.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all wfh-tracker operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum TrackerError {
    /// Import decoding or validation failed.
    Import(ImportError),

    /// Export encoding failed.
    Export(ExportError),

    /// An HH:MM:SS string could not be parsed.
    Time(TimeFormatError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import(e) => write!(f, "Import error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Time(e) => write!(f, "Time format error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Import(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Time(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ImportError> for TrackerError {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

impl From<ExportError> for TrackerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

impl From<TimeFormatError> for TrackerError {
    fn from(e: TimeFormatError) -> Self {
        Self::Time(e)
    }
}

// ---------------------------------------------------------------------------
// Time format errors
// ---------------------------------------------------------------------------

/// Errors from parsing an `HH:MM:SS` time string.
#[derive(Debug)]
pub enum TimeFormatError {
    /// The string did not split into exactly three colon-delimited fields.
    FieldCount { value: String, found: usize },

    /// A field was not a valid non-negative integer.
    InvalidField { value: String },
}

impl fmt::Display for TimeFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { value, found } => write!(
                f,
                "Invalid time format: '{value}' has {found} fields, expected 3"
            ),
            Self::InvalidField { value } => {
                write!(f, "Invalid time format: '{value}'")
            }
        }
    }
}

impl std::error::Error for TimeFormatError {}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Errors from decoding an imported JSON or CSV file.
///
/// Line numbers are 1-based and count the CSV header as line 1, matching
/// what a user sees in a text editor. The whole import fails on the first
/// error; no partial collection is ever produced.
#[derive(Debug)]
pub enum ImportError {
    /// Neither the declared MIME type nor the file extension identified a
    /// supported format.
    UnsupportedFormat,

    /// The file content is not syntactically valid JSON.
    MalformedJson { source: serde_json::Error },

    /// The JSON top-level value is not an array (or an export envelope
    /// carrying a `projects` array).
    NotAnArray,

    /// A JSON array element failed structural validation.
    /// `payload` is the offending element rendered back as JSON.
    InvalidProjectData { index: usize, payload: String },

    /// The CSV content has fewer than a header row plus one data row.
    MalformedCsv,

    /// A CSV row has fewer than two fields.
    InsufficientFields { line: usize },

    /// A CSV time field was present but not parseable as `HH:MM:SS`,
    /// and no usable raw-seconds field was available.
    InvalidTimeFormat { line: usize },

    /// A CSV raw-seconds field was not a valid integer.
    InvalidElapsedTime { line: usize },

    /// The file could not be read from disk.
    FileRead { path: PathBuf, source: io::Error },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat => {
                write!(f, "Unsupported file format. Please upload a JSON or CSV file.")
            }
            Self::MalformedJson { .. } => {
                write!(f, "Invalid JSON format. Please check your file.")
            }
            Self::NotAnArray => {
                write!(f, "Invalid JSON format. Expected an array of projects.")
            }
            Self::InvalidProjectData { index, payload } => {
                write!(f, "Invalid project data at element {index}: {payload}")
            }
            Self::MalformedCsv => {
                write!(f, "CSV file must have a header row and at least one data row.")
            }
            Self::InsufficientFields { line } => {
                write!(f, "Invalid CSV row at line {line}: insufficient fields")
            }
            Self::InvalidTimeFormat { line } => {
                write!(f, "Invalid time format at line {line}")
            }
            Self::InvalidElapsedTime { line } => {
                write!(f, "Invalid elapsed time at line {line}")
            }
            Self::FileRead { path, source } => {
                write!(f, "Failed to read file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedJson { source } => Some(source),
            Self::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors from encoding the project collection for export.
///
/// Path context for file-backed writers is added by the caller via
/// `TrackerError::Io`; the encoder itself writes to any `Write`.
#[derive(Debug)]
pub enum ExportError {
    /// JSON serialisation failed.
    Json { source: serde_json::Error },

    /// Writing the encoded output failed.
    Io { source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => {
                write!(f, "Failed to export data to JSON format: {source}")
            }
            Self::Io { source } => {
                write!(f, "Failed to write export data: {source}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Io { source } => Some(source),
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================
