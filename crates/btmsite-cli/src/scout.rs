//! `scout` command: sweep one ZIP code and export the leads.

use std::path::Path;

use btmsite_core::{write_export, AppConfig, ExportError, ExportFormat, QualificationRules};
use btmsite_pipeline::scout_zip;
use btmsite_places::PlacesClient;
use clap::ValueEnum;

/// Which export files a scout run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportTarget {
    Csv,
    Json,
    Both,
    #[value(name = "none")]
    Skip,
}

impl ExportTarget {
    pub(crate) fn formats(self) -> &'static [ExportFormat] {
        match self {
            ExportTarget::Csv => &[ExportFormat::Csv],
            ExportTarget::Json => &[ExportFormat::Json],
            ExportTarget::Both => &[ExportFormat::Csv, ExportFormat::Json],
            ExportTarget::Skip => &[],
        }
    }
}

/// Scout `zip`, print the leads, and write the requested exports to `dir`.
///
/// An empty lead list is reported, not treated as an error.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the scout fails
/// upstream, or an export file cannot be written.
pub(crate) async fn run_scout(
    config: &AppConfig,
    rules: &QualificationRules,
    zip: &str,
    target: ExportTarget,
    dir: &Path,
) -> anyhow::Result<()> {
    let places = PlacesClient::with_base_url(
        &config.google_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.google_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?;

    let report = scout_zip(&places, zip, rules).await?;

    println!(
        "ZIP {}: {} candidates, {} corporate skipped, {} leads",
        report.zip_code,
        report.candidates,
        report.corporate_skipped,
        report.leads.len()
    );
    if !report.leads.is_empty() {
        println!("{:<40}{:<40}PLACE ID", "NAME", "ADDRESS");
        for lead in &report.leads {
            println!("{:<40}{:<40}{}", lead.name, lead.address, lead.place_id);
        }
    }

    for &format in target.formats() {
        match write_export(dir, &report.zip_code, &report.leads, format) {
            Ok(path) => println!("wrote {}", path.display()),
            Err(ExportError::NoLeads) => {
                println!("{}", ExportError::NoLeads);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
