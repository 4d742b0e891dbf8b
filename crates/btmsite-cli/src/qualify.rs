//! `qualify` command: run the checklist for one place and print the cards.

use std::path::Path;

use btmsite_core::{AppConfig, CheckStatus, Place, QualificationRules, StepOutcome};
use btmsite_pipeline::{qualify_place, PlaceQuery, QualifyFailure};
use btmsite_places::{CensusClient, PlacesClient};

const ERROR_BANNER: &str = "ERROR";

fn status_tag(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Success => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Warn => "WARN",
    }
}

/// One line per step: `[PASS] 1. Location: ZIP: 30301 / Found: Joe's Corner`.
pub(crate) fn render_card(outcome: &StepOutcome) -> String {
    format!(
        "[{}] {}. {}: {}",
        status_tag(outcome.result.status),
        outcome.step.number(),
        outcome.step.title(),
        outcome.result.message
    )
}

fn load_suggestion(path: &Path) -> anyhow::Result<Place> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read suggestion {}: {e}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid suggestion {}: {e}", path.display()))
}

fn print_failure(failure: &QualifyFailure, json: bool) -> anyhow::Result<()> {
    let outcomes = failure.outcomes();
    if json {
        let body = serde_json::json!({
            "status": ERROR_BANNER,
            "failed_step": failure.step,
            "error": failure.error.to_string(),
            "steps": outcomes,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for outcome in &outcomes {
            println!("{}", render_card(outcome));
        }
        println!();
        println!("{ERROR_BANNER}");
    }
    Ok(())
}

/// Qualify one address (or a pre-resolved suggestion) and print the result.
///
/// # Errors
///
/// Returns an error if a client cannot be built, the suggestion file is
/// unreadable, or the run aborts. An aborted run prints its partial step
/// cards and the `ERROR` banner first.
pub(crate) async fn run_qualify(
    config: &AppConfig,
    rules: &QualificationRules,
    address: Option<&str>,
    min_density: u64,
    suggestion: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let places = PlacesClient::with_base_url(
        &config.google_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.google_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?;
    let census = CensusClient::with_base_url(
        config.census_api_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        &config.census_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Census client: {e}"))?;

    let query = match (suggestion, address) {
        (Some(path), _) => PlaceQuery::Suggestion(load_suggestion(path)?),
        (None, Some(text)) => PlaceQuery::Text(text.to_string()),
        (None, None) => anyhow::bail!("an address or --suggestion is required"),
    };

    let report = match qualify_place(&places, &census, query, min_density, rules).await {
        Ok(report) => report,
        Err(failure) => {
            print_failure(&failure, json)?;
            return Err(failure.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({})", report.business_name, report.place_id);
    for outcome in &report.steps {
        println!("{}", render_card(outcome));
    }
    println!("Competitors: {}", report.competitor_note());
    println!();
    println!("{}", report.banner());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use btmsite_core::{CheckResult, Step};

    #[test]
    fn card_shows_tag_number_title_and_message() {
        let outcome = StepOutcome {
            step: Step::Population,
            result: CheckResult::fail("Density: 850/sq mi (Min: 1000)"),
        };
        assert_eq!(
            render_card(&outcome),
            "[FAIL] 2. Population density: Density: 850/sq mi (Min: 1000)"
        );
    }

    #[test]
    fn warn_card_uses_warn_tag() {
        let outcome = StepOutcome {
            step: Step::StoreHours,
            result: CheckResult::warn("Hours not available. Manual check required."),
        };
        assert!(render_card(&outcome).starts_with("[WARN] 5. Store hours"));
    }

    #[test]
    fn suggestion_file_parses_a_place() {
        let dir = std::env::temp_dir().join(format!("btmsite-suggestion-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("place.json");
        std::fs::write(
            &path,
            r#"{
                "place_id": "joes",
                "name": "Joe's Corner",
                "location": { "lat": 33.749, "lng": -84.388 },
                "postal_code": "30301",
                "vicinity": null,
                "categories": [],
                "business_status": null,
                "opening_hours": null
            }"#,
        )
        .unwrap();

        let place = load_suggestion(&path).expect("should parse");
        assert_eq!(place.postal_code.as_deref(), Some("30301"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
