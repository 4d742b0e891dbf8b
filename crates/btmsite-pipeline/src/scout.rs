//! Bulk ZIP scout: sweep the retail categories around a ZIP centroid and
//! keep the independent, operational places with no own-network kiosk
//! nearby.
//!
//! Both fan-out phases are all-or-nothing. The first upstream error drops
//! the outstanding requests and aborts the batch.

use std::collections::HashSet;

use btmsite_core::{
    is_corporate_name, scan_competitors, Coordinate, Lead, Place, QualificationRules,
};
use btmsite_places::{NearbyFilter, PlacesClient, PlacesError};
use futures::future::try_join_all;
use futures::stream::{FuturesUnordered, TryStreamExt};
use serde::Serialize;

use crate::error::PipelineError;

/// Outcome of one scouting run. The caller owns it and decides whether to
/// export `leads`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoutReport {
    pub zip_code: String,
    pub centroid: Coordinate,
    /// Unique operational places with an address, before the corporate filter.
    pub candidates: usize,
    pub corporate_skipped: usize,
    /// In the order competitor scans completed.
    pub leads: Vec<Lead>,
}

/// Flatten per-category results into unique candidates keyed by place id.
///
/// Only operational places with a non-blank vicinity survive. The first
/// occurrence of a place id wins.
#[must_use]
pub fn merge_candidates<I>(batches: I) -> Vec<Place>
where
    I: IntoIterator<Item = Vec<Place>>,
{
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|p| p.is_operational() && p.vicinity().is_some())
        .filter(|p| seen.insert(p.place_id.clone()))
        .collect()
}

/// Scouts every configured category around `zip_code`.
///
/// # Errors
///
/// Returns [`PipelineError::Places`] if the ZIP does not geocode or any
/// nearby search fails.
pub async fn scout_zip(
    places: &PlacesClient,
    zip_code: &str,
    rules: &QualificationRules,
) -> Result<ScoutReport, PipelineError> {
    let centroid = places.geocode(zip_code).await?;

    let batches = try_join_all(rules.scout_categories.iter().map(|category| {
        places.nearby_search(
            centroid,
            rules.scout_radius_meters,
            NearbyFilter::Category(category),
        )
    }))
    .await?;

    let merged = merge_candidates(batches);
    let candidates = merged.len();
    let (corporate, independents): (Vec<Place>, Vec<Place>) = merged
        .into_iter()
        .partition(|p| is_corporate_name(&p.name, rules));
    tracing::debug!(
        zip_code,
        candidates,
        corporate = corporate.len(),
        "candidates merged"
    );

    let scans: FuturesUnordered<_> = independents
        .into_iter()
        .map(|place| async move {
            let nearby = places
                .nearby_names(
                    place.location,
                    rules.competitor_radius_meters,
                    NearbyFilter::Keyword(&rules.competitor_search_keyword),
                )
                .await?;
            let scan = scan_competitors(nearby.iter().map(String::as_str), rules);
            Ok::<_, PlacesError>((place, scan.self_brand_count))
        })
        .collect();
    let scanned: Vec<(Place, usize)> = scans.try_collect().await?;

    let leads: Vec<Lead> = scanned
        .iter()
        .filter(|(_, self_brand)| *self_brand == 0)
        .filter_map(|(place, _)| Lead::from_place(place))
        .collect();

    tracing::info!(
        zip_code,
        candidates,
        corporate_skipped = corporate.len(),
        leads = leads.len(),
        "scout complete"
    );

    Ok(ScoutReport {
        zip_code: zip_code.to_string(),
        centroid,
        candidates,
        corporate_skipped: corporate.len(),
        leads,
    })
}
