//! Population density lookups against the Census ACS 5-year API.
//!
//! The API answers with a JSON table: a header row followed by data rows,
//! every cell a string. A ZIP with no record yields either an empty body
//! or a header-only table.

use btmsite_core::PopulationDensity;
use reqwest::{Client, Url};

use crate::client::{build_http_client, normalise_base_url};
use crate::error::PlacesError;

const DEFAULT_BASE_URL: &str = "https://api.census.gov/";
const ACS5_PATH: &str = "data/2022/acs/acs5";

/// Total population and land area (square meters).
const ACS_FIELDS: &str = "B01003_001E,ALAND";

const SQ_METERS_PER_SQ_MILE: f64 = 2_589_988.11;

/// Persons per square mile, rounded; zero land area yields zero.
// Densities are bounded by real population figures, well inside u64.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn density_per_sq_mile(population: f64, land_area_sq_meters: f64) -> u64 {
    if land_area_sq_meters <= 0.0 {
        return 0;
    }
    let sq_miles = land_area_sq_meters / SQ_METERS_PER_SQ_MILE;
    let density = (population / sq_miles).round();
    if density.is_finite() && density > 0.0 {
        density as u64
    } else {
        0
    }
}

pub struct CensusClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl CensusClient {
    /// Creates a client pointed at the production Census API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] or [`PlacesError::InvalidBaseUrl`].
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            api_key: api_key.map(str::to_owned),
            base_url: normalise_base_url(base_url)?,
        })
    }

    /// Fetches population and land area for a ZIP code tabulation area and
    /// derives persons per square mile.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::NoData`] if the API has no record for the ZIP.
    /// - [`PlacesError::InvalidData`] if the figures are not numbers.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or shape failures.
    pub async fn population_density(
        &self,
        zip_code: &str,
    ) -> Result<PopulationDensity, PlacesError> {
        let url = self.build_url(zip_code)?;
        let context = format!("acs5(zip={zip_code})");
        tracing::debug!(context = %context, "census request");

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(PlacesError::NoData(zip_code.to_string()));
        }

        let table: Vec<Vec<Option<String>>> =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let row = table
            .get(1)
            .ok_or_else(|| PlacesError::NoData(zip_code.to_string()))?;

        let cell = |idx: usize, name: &str| -> Result<f64, PlacesError> {
            row.get(idx)
                .and_then(Option::as_deref)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or_else(|| PlacesError::InvalidData {
                    context: context.clone(),
                    reason: format!("{name} is missing or not a number"),
                })
        };

        let population = cell(0, "population")?;
        let land_area_sq_meters = cell(1, "land area")?;

        Ok(PopulationDensity {
            population,
            land_area_sq_meters,
            density: density_per_sq_mile(population, land_area_sq_meters),
        })
    }

    fn build_url(&self, zip_code: &str) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(ACS5_PATH)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("get", ACS_FIELDS);
            pairs.append_pair("for", &format!("zip code tabulation area:{zip_code}"));
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        Ok(url)
    }
}
