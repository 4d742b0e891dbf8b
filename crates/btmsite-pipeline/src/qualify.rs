//! Five-step qualification of a single address.
//!
//! Steps run strictly in order. A failed rule is recorded and the run
//! continues; an upstream error aborts the run with a [`QualifyFailure`]
//! that keeps every outcome gathered so far.

use btmsite_core::{
    classify, classify_hours, format_thousands, scan_competitors, CheckResult, Place,
    QualificationReport, QualificationRules, Step, StepOutcome,
};
use btmsite_places::{CensusClient, NearbyFilter, PlacesClient};

use crate::error::{PipelineError, QualifyFailure};

/// What to qualify: free text to resolve remotely, or a place the caller
/// already resolved (for example an autocomplete selection).
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceQuery {
    Text(String),
    Suggestion(Place),
}

struct Run {
    completed: Vec<StepOutcome>,
}

impl Run {
    fn record(&mut self, step: Step, result: CheckResult) {
        tracing::debug!(
            step = step.number(),
            status = %result.status,
            message = %result.message,
            "step complete"
        );
        self.completed.push(StepOutcome { step, result });
    }

    fn abort(self, step: Step, error: impl Into<PipelineError>) -> QualifyFailure {
        let error = error.into();
        tracing::warn!(step = step.number(), error = %error, "qualification aborted");
        QualifyFailure {
            step,
            completed: self.completed,
            error,
        }
    }
}

fn density_check(density: u64, min_density: u64) -> CheckResult {
    let message = format!("Density: {}/sq mi", format_thousands(density));
    if density >= min_density {
        CheckResult::success(message)
    } else {
        CheckResult::fail(format!("{message} (Min: {min_density})"))
    }
}

/// Runs the full checklist for one place.
///
/// # Errors
///
/// Returns [`QualifyFailure`] when the place cannot be resolved to a postal
/// code, the postal code has no demographic record, details are missing, or
/// any upstream call fails.
pub async fn qualify_place(
    places: &PlacesClient,
    census: &CensusClient,
    query: PlaceQuery,
    min_density: u64,
    rules: &QualificationRules,
) -> Result<QualificationReport, QualifyFailure> {
    let mut run = Run {
        completed: Vec::with_capacity(Step::ALL.len()),
    };

    let place = match query {
        PlaceQuery::Text(text) => match places.find_place(&text).await {
            Ok(place) => place,
            Err(e) => return Err(run.abort(Step::Geocode, e)),
        },
        PlaceQuery::Suggestion(place) => place,
    };
    let Some(postal_code) = place.postal_code.clone() else {
        return Err(run.abort(Step::Geocode, PipelineError::MissingPostalCode));
    };
    run.record(
        Step::Geocode,
        CheckResult::success(format!("ZIP: {postal_code} / Found: {}", place.name)),
    );

    let density = match census.population_density(&postal_code).await {
        Ok(d) => d.density,
        Err(e) => return Err(run.abort(Step::Population, e)),
    };
    run.record(Step::Population, density_check(density, min_density));

    let nearby = match places
        .nearby_names(
            place.location,
            rules.competitor_radius_meters,
            NearbyFilter::Keyword(&rules.competitor_search_keyword),
        )
        .await
    {
        Ok(nearby) => nearby,
        Err(e) => return Err(run.abort(Step::NearbyBtms, e)),
    };
    let scan = scan_competitors(nearby.iter().map(String::as_str), rules);
    run.record(Step::NearbyBtms, scan.to_check());

    let details = match places.place_details(&place.place_id).await {
        Ok(details) => details,
        Err(e) => return Err(run.abort(Step::BusinessType, e)),
    };
    let business_name = details
        .display_name
        .clone()
        .unwrap_or_else(|| place.name.clone());
    let classification = classify(&details.categories, &business_name, rules);
    run.record(Step::BusinessType, classification.to_check());

    run.record(
        Step::StoreHours,
        classify_hours(details.opening_hours.as_ref(), rules),
    );

    let report = QualificationReport::new(
        business_name,
        place.place_id,
        postal_code,
        density,
        scan.competitor_counts,
        run.completed,
    );
    tracing::info!(
        place_id = %report.place_id,
        postal_code = %report.postal_code,
        qualified = report.qualified,
        "qualification complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use btmsite_core::CheckStatus;

    #[test]
    fn density_at_minimum_passes() {
        let check = density_check(1000, 1000);
        assert_eq!(check, CheckResult::success("Density: 1,000/sq mi"));
    }

    #[test]
    fn density_below_minimum_names_the_threshold() {
        let check = density_check(850, 1000);
        assert_eq!(check.status, CheckStatus::Fail);
        assert_eq!(check.message, "Density: 850/sq mi (Min: 1000)");
    }
}
