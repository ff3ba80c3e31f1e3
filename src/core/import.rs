// wfh-tracker - core/import.rs
//
// Import decoding: turns an uploaded JSON or CSV text blob back into an
// ordered list of projects, with format auto-detection, structural
// validation, and per-row error reporting.
//
// Decoding is all-or-nothing: the first invalid element or row fails the
// whole import and no projects are produced.

use crate::core::model::Project;
use crate::core::time_format::parse_hms;
use crate::util::constants::{MIME_CSV, MIME_JSON};
use crate::util::error::ImportError;
use serde_json::Value;

// =============================================================================
// Format selection
// =============================================================================

/// Decode `content` as JSON or CSV.
///
/// The declared MIME type wins when it names a supported format; otherwise
/// the file extension decides; otherwise the import is rejected with a
/// fixed user-facing message.
pub fn import_projects(
    content: &str,
    filename: &str,
    declared_mime: Option<&str>,
) -> Result<Vec<Project>, ImportError> {
    let mime = declared_mime.unwrap_or("");

    if mime == MIME_JSON || filename.ends_with(".json") {
        parse_json(content)
    } else if mime == MIME_CSV || filename.ends_with(".csv") {
        parse_csv(content)
    } else {
        Err(ImportError::UnsupportedFormat)
    }
}

// =============================================================================
// JSON path
// =============================================================================

/// Result of validating one JSON array element. Validation never panics and
/// never throws; the decoder turns the first `Invalid` into a failed import.
enum Validated {
    Valid(Project),
    Invalid,
}

fn parse_json(content: &str) -> Result<Vec<Project>, ImportError> {
    // Files exported by Windows tools often carry a UTF-8 BOM.
    let clean = content.strip_prefix('\u{feff}').unwrap_or(content);

    let parsed: Value =
        serde_json::from_str(clean).map_err(|e| ImportError::MalformedJson { source: e })?;

    // Accept the bare storage array, or the export envelope whose
    // `projects` field is an array. Any other shape is rejected.
    let elements = match &parsed {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("projects").and_then(Value::as_array) {
            Some(items) => items.as_slice(),
            None => return Err(ImportError::NotAnArray),
        },
        _ => return Err(ImportError::NotAnArray),
    };

    let mut projects = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match validate_element(element) {
            Validated::Valid(project) => projects.push(project),
            Validated::Invalid => {
                return Err(ImportError::InvalidProjectData {
                    index,
                    payload: element.to_string(),
                });
            }
        }
    }

    Ok(projects)
}

/// Structural validation of one element: an object with a non-empty string
/// `name` and a non-negative integer `elapsedTime`. An optional numeric
/// `hourlyRate` >= 0 is carried over when present.
fn validate_element(element: &Value) -> Validated {
    let Some(object) = element.as_object() else {
        return Validated::Invalid;
    };

    let Some(name) = object.get("name").and_then(Value::as_str) else {
        return Validated::Invalid;
    };
    if name.is_empty() {
        return Validated::Invalid;
    }

    // `as_u64` is None for negative, fractional, or non-numeric values.
    let Some(elapsed) = object.get("elapsedTime").and_then(Value::as_u64) else {
        return Validated::Invalid;
    };

    let mut project = Project::with_elapsed(name, elapsed);
    match object.get("hourlyRate") {
        None | Some(Value::Null) => {}
        Some(rate) => match rate.as_f64() {
            Some(r) if r >= 0.0 => project.set_hourly_rate(r),
            _ => return Validated::Invalid,
        },
    }

    Validated::Valid(project)
}

// =============================================================================
// CSV path
// =============================================================================

fn parse_csv(content: &str) -> Result<Vec<Project>, ImportError> {
    let lines: Vec<&str> = content.trim().split('\n').collect();

    if lines.len() < 2 {
        return Err(ImportError::MalformedCsv);
    }

    let mut projects = Vec::with_capacity(lines.len() - 1);

    // Skip the header row; it is not validated against the expected text.
    // Line numbers are 1-based with the header as line 1.
    for (i, raw_line) in lines.iter().enumerate().skip(1) {
        let line = i + 1;
        // Interior CRLF line endings leave a trailing \r after the split.
        let fields = split_csv_line(raw_line.trim_end_matches('\r'));

        if fields.len() < 2 {
            return Err(ImportError::InsufficientFields { line });
        }

        // Field 1 (HH:MM:SS) takes precedence over field 2 (raw seconds)
        // when both are present.
        let elapsed = if fields[1].contains(':') {
            parse_hms(&fields[1]).map_err(|_| ImportError::InvalidTimeFormat { line })?
        } else if fields.len() >= 3 && !fields[2].is_empty() {
            fields[2]
                .parse::<u64>()
                .map_err(|_| ImportError::InvalidElapsedTime { line })?
        } else {
            return Err(ImportError::InvalidTimeFormat { line });
        };

        // The name is taken verbatim — no trimming, and an empty name is
        // accepted here (CSV rows are positional hand-authored data; the
        // JSON path's `name` key is an authored contract and stays strict).
        projects.push(Project::with_elapsed(fields[0].clone(), elapsed));
    }

    Ok(projects)
}

/// Quote-aware field splitter for one physical CSV line.
///
/// A field may be wrapped in double quotes; inside quotes a doubled quote
/// is an escaped literal quote and a comma is not a separator. Splitting
/// happens per physical line before this runs, so a quoted field containing
/// an embedded newline is not supported and surfaces as a row with too few
/// fields.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

// =============================================================================
// Unit tests
// =============================================================================
