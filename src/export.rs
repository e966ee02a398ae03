// src/export.rs
use crate::config::Units;
use crate::history::LoggedSet;
use chrono::SecondsFormat;
use std::io::Write;

/// Writes logged sets as CSV, newest first, with a header row.
/// # Errors
/// Returns `csv::Error` if writing to `out` fails.
pub fn write_history_csv<W: Write>(
    out: W,
    entries: &[LoggedSet],
    units: Units,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    let weight_header = format!("Weight_{}", units.weight_label());
    writer.write_record([
        "Timestamp",
        "Exercise",
        weight_header.as_str(),
        "Reps",
        "Notes",
        "Category",
    ])?;

    for entry in entries {
        writer.write_record([
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.exercise_name.clone(),
            entry.weight.to_string(),
            entry.reps.to_string(),
            entry.notes.clone(),
            entry.category.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
