use crate::error::ClientError;
use crate::form::submission::{Fields, Record};
use chrono::Local;
use csv::WriterBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const BASE_COLUMNS: [&str; 3] = ["code", "email", "submitted_at"];
const BASIC_COLUMNS: [&str; 4] = ["code", "email", "status", "submitted_at"];

/// Column layout of an export, fixed from the first record.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    pub names: Vec<String>,
    /// False when the first record's fields were not a mapping; field
    /// values are then left out of every row.
    pub include_fields: bool,
}

/// Result of an export: how many rows were written and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub exported: usize,
    pub destination: Option<PathBuf>,
}

/// Derives the columns from the `fields` of the first record only.
///
/// A mapping gives `code, email, submitted_at` followed by its keys in
/// order; anything else falls back to `code, email, status, submitted_at`.
pub fn derive_columns(first: &Record) -> Columns {
    match &first.fields {
        Fields::Mapping(map) => {
            let mut names: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
            for key in map.keys() {
                if !names.iter().any(|n| n == key) {
                    names.push(key.clone());
                }
            }
            Columns {
                names,
                include_fields: true,
            }
        }
        other => {
            let shape = match other {
                Fields::Sequence(_) => "list",
                _ => "unknown",
            };
            tracing::warn!(
                "Fields data is in an unexpected format ({shape}). Exporting basic info only."
            );
            Columns {
                names: BASIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
                include_fields: false,
            }
        }
    }
}

/// Builds one CSV row aligned with `columns`.
///
/// Field values override the top-level attributes of the same name; keys
/// outside the column set are dropped and missing keys give empty cells.
pub fn build_row(record: &Record, columns: &Columns) -> Vec<String> {
    columns
        .names
        .iter()
        .map(|name| {
            if columns.include_fields {
                if let Some(value) = record.fields.get(name) {
                    return cell(value);
                }
            }
            let top_level = match name.as_str() {
                "code" => record.code.as_deref(),
                "email" => record.email.as_deref(),
                "status" => record.status.as_deref(),
                "submitted_at" => record.submitted_at.as_deref(),
                _ => None,
            };
            top_level.unwrap_or_default().to_string()
        })
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Writes the header plus one row per record to `writer`.
///
/// # Arguments
/// * `records` - Registrations in the order they were retrieved
/// * `writer` - Destination of the CSV text
///
/// # Returns
/// The number of data rows written. Nothing is written for an empty slice.
pub fn write_registrations<W: Write>(records: &[Record], writer: W) -> Result<usize, ClientError> {
    let Some(first) = records.first() else {
        return Ok(0);
    };

    // Columns come from the first record and hold for the whole file
    let columns = derive_columns(first);
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    // Header is written by hand so it matches the derived columns exactly
    wtr.write_record(&columns.names)?;

    // One row per record, aligned with the header
    for record in records {
        wtr.write_record(build_row(record, &columns))?;
    }

    wtr.flush()?;
    Ok(records.len())
}

/// Default export file name, e.g. `registrations_20260301_142530.csv`.
pub fn default_export_name() -> PathBuf {
    PathBuf::from(format!(
        "registrations_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Exports registrations to `filename`, or to a time-stamped file if none
/// is given. An empty slice creates no file.
pub fn export_registrations_to_csv(
    records: &[Record],
    filename: Option<&Path>,
) -> Result<ExportSummary, ClientError> {
    if records.is_empty() {
        println!("✗ No registrations to export");
        return Ok(ExportSummary {
            exported: 0,
            destination: None,
        });
    }

    // Fall back to a time-stamped name in the working directory
    let path = filename
        .map(Path::to_path_buf)
        .unwrap_or_else(default_export_name);

    let file = File::create(&path)?;
    let exported = write_registrations(records, file)?;

    tracing::info!(path = %path.display(), exported, "CSV export written");
    println!("✓ Exported {} registrations to {}", exported, path.display());

    Ok(ExportSummary {
        exported,
        destination: Some(path),
    })
}
