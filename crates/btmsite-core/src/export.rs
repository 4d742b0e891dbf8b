//! CSV and JSON export of scout leads.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Lead;

pub const CSV_HEADER: &str = "Name,Address,Latitude,Longitude,PlaceID";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No leads to export.")]
    NoLeads,

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize leads: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// `zip_scout_leads_<zip>.<ext>`
#[must_use]
pub fn export_file_name(zip_code: &str, format: ExportFormat) -> String {
    format!("zip_scout_leads_{zip_code}.{}", format.extension())
}

/// Escape a free-text CSV field: quotes are doubled, and the value is
/// wrapped in quotes only when it contains a comma. Empty becomes `""`.
#[must_use]
pub fn sanitize_csv_field(value: &str) -> String {
    if value.is_empty() {
        return "\"\"".to_string();
    }
    let escaped = value.replace('"', "\"\"");
    if escaped.contains(',') {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Render leads as CSV with a header row and `\n` line endings.
#[must_use]
pub fn leads_to_csv(leads: &[Lead]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for lead in leads {
        let row = [
            sanitize_csv_field(&lead.name),
            sanitize_csv_field(&lead.address),
            lead.lat.to_string(),
            lead.lng.to_string(),
            lead.place_id.clone(),
        ]
        .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

/// Render leads as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn leads_to_json(leads: &[Lead]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(leads)?)
}

/// Write the leads for `zip_code` into `dir` in the given format and return
/// the written path.
///
/// # Errors
///
/// Returns [`ExportError::NoLeads`] for an empty list, or an IO/JSON error.
pub fn write_export(
    dir: &Path,
    zip_code: &str,
    leads: &[Lead],
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    if leads.is_empty() {
        return Err(ExportError::NoLeads);
    }

    let content = match format {
        ExportFormat::Csv => leads_to_csv(leads),
        ExportFormat::Json => leads_to_json(leads)?,
    };

    let path = dir.join(export_file_name(zip_code, format));
    std::fs::write(&path, content).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), leads = leads.len(), "wrote lead export");
    Ok(path)
}
