// wfh-tracker - core/export.rs
//
// CSV and JSON export of the project collection.
// Core layer: writes to any Write trait object; the caller owns the file.
//
// The JSON export uses an envelope (exportDate, version, totalProjects,
// projects) rather than the bare storage array; the import decoder
// special-cases the envelope so export -> import round-trips.

use crate::core::model::Project;
use crate::core::time_format::format_hms;
use crate::util::constants::{CSV_EXPORT_HEADER, EXPORT_FILE_PREFIX, EXPORT_FORMAT_VERSION};
use crate::util::error::ExportError;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;

// =============================================================================
// Export format
// =============================================================================

/// The two supported interchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// MIME type for the exported blob.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => crate::util::constants::MIME_JSON,
            Self::Csv => crate::util::constants::MIME_CSV,
        }
    }
}

/// Suggested file name for an export created now:
/// `wfh-projects-YYYY-MM-DD.<ext>` using the local date.
pub fn export_filename(format: ExportFormat) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    format!("{EXPORT_FILE_PREFIX}-{date}.{}", format.extension())
}

// =============================================================================
// JSON export
// =============================================================================

/// On-the-wire shape of one project inside the JSON export envelope.
/// Carries a redundant human-readable `formattedTime` alongside the
/// authoritative second count.
#[derive(Debug, Serialize)]
struct ExportedProject<'a> {
    name: &'a str,

    #[serde(rename = "elapsedTime")]
    elapsed_time: u64,

    #[serde(rename = "formattedTime")]
    formatted_time: String,
}

/// Top-level JSON export document.
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    #[serde(rename = "exportDate")]
    export_date: String,

    version: &'static str,

    #[serde(rename = "totalProjects")]
    total_projects: usize,

    projects: Vec<ExportedProject<'a>>,
}

/// Export the collection as a pretty-printed JSON envelope.
/// Returns the number of projects written.
pub fn export_json<W: Write>(projects: &[Project], writer: W) -> Result<usize, ExportError> {
    let document = ExportDocument {
        export_date: chrono::Utc::now().to_rfc3339(),
        version: EXPORT_FORMAT_VERSION,
        total_projects: projects.len(),
        projects: projects
            .iter()
            .map(|p| ExportedProject {
                name: &p.name,
                elapsed_time: p.elapsed_seconds,
                formatted_time: format_hms(p.elapsed_seconds),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(writer, &document)
        .map_err(|e| ExportError::Json { source: e })?;
    Ok(projects.len())
}

// =============================================================================
// CSV export
// =============================================================================

/// Escape one CSV field: if it contains a comma, a double quote, or a
/// newline, wrap it in double quotes and double every embedded quote;
/// otherwise return it unchanged.
pub fn escape_csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Export the collection as CSV: the fixed header row followed by one
/// `name,HH:MM:SS,seconds` row per project, newline-separated with no
/// trailing newline. Returns the number of rows written.
pub fn export_csv<W: Write>(projects: &[Project], mut writer: W) -> Result<usize, ExportError> {
    let io_err = |source| ExportError::Io { source };

    writer.write_all(CSV_EXPORT_HEADER.as_bytes()).map_err(io_err)?;

    for project in projects {
        let row = format!(
            "\n{},{},{}",
            escape_csv_field(&project.name),
            format_hms(project.elapsed_seconds),
            project.elapsed_seconds
        );
        writer.write_all(row.as_bytes()).map_err(io_err)?;
    }

    writer.flush().map_err(io_err)?;
    Ok(projects.len())
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_projects() -> Vec<Project> {
        vec![
            Project::with_elapsed("A", 3661),
            Project::with_elapsed("Side, project", 90061),
        ]
    }

    /// Plain fields pass through untouched.
    #[test]
    fn test_escape_leaves_plain_fields_alone() {
        assert_eq!(escape_csv_field("Website redesign"), "Website redesign");
        assert_eq!(escape_csv_field(""), "");
    }

    /// Fields with commas, quotes, or newlines are quote-wrapped with
    /// embedded quotes doubled.
    #[test]
    fn test_escape_special_fields() {
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(
            escape_csv_field("Say \"hi\", now"),
            "\"Say \"\"hi\"\", now\""
        );
    }

    #[test]
    fn test_csv_export_header_and_rows() {
        let mut buf = Vec::new();
        let count = export_csv(&sample_projects(), &mut buf).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "Project Name,Elapsed Time (HH:MM:SS),Elapsed Time (Seconds)"
        );
        assert_eq!(lines[1], "A,01:01:01,3661");
        assert_eq!(lines[2], "\"Side, project\",25:01:01,90061");
    }

    /// An empty collection still produces the header row.
    #[test]
    fn test_csv_export_empty_collection() {
        let mut buf = Vec::new();
        let count = export_csv(&[], &mut buf).unwrap();
        assert_eq!(count, 0);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            super::CSV_EXPORT_HEADER
        );
    }

    #[test]
    fn test_json_export_envelope() {
        let mut buf = Vec::new();
        let count = export_json(&sample_projects(), &mut buf).unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["totalProjects"], 2);
        assert!(value["exportDate"].is_string());

        let projects = value["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["name"], "A");
        assert_eq!(projects[0]["elapsedTime"], 3661);
        assert_eq!(projects[0]["formattedTime"], "01:01:01");
        assert_eq!(projects[1]["formattedTime"], "25:01:01");
    }

    #[test]
    fn test_export_filename_convention() {
        let name = export_filename(ExportFormat::Csv);
        assert!(name.starts_with("wfh-projects-"));
        assert!(name.ends_with(".csv"));
        // wfh-projects-YYYY-MM-DD.csv
        assert_eq!(name.len(), "wfh-projects-".len() + 10 + ".csv".len());
    }
}
