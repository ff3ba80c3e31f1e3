// wfh-tracker - core/time_format.rs
//
// Conversion between elapsed-seconds counters and zero-padded HH:MM:SS
// strings. Pure functions, no state.

use crate::util::error::TimeFormatError;

/// Format a second count as `HH:MM:SS`, each field zero-padded to width 2.
///
/// Hours are unbounded (not clamped to 24): `format_hms(90061)` is
/// `"25:01:01"`.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parse an `HH:MM:SS` string back into a second count.
///
/// The string must split into exactly three colon-delimited fields, each a
/// valid non-negative base-10 integer. Fields are deliberately NOT
/// range-checked to 0-59: `"00:75:00"` parses as 4500 seconds. Importable
/// files written by hand rely on this leniency; the value normalises the
/// next time it is formatted.
pub fn parse_hms(text: &str) -> Result<u64, TimeFormatError> {
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() != 3 {
        return Err(TimeFormatError::FieldCount {
            value: text.to_string(),
            found: fields.len(),
        });
    }

    let mut parts = [0u64; 3];
    for (slot, field) in parts.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| TimeFormatError::InvalidField {
            value: text.to_string(),
        })?;
    }

    let [hours, minutes, seconds] = parts;
    Ok(hours * 3600 + minutes * 60 + seconds)
}

// =============================================================================
// Unit tests
// =============================================================================
