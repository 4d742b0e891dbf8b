//! HTTP client for the Google Places and Geocoding web services.
//!
//! Wraps `reqwest` with API key management, envelope status handling, and
//! typed response deserialization. `OK` and `ZERO_RESULTS` are accepted;
//! every other status surfaces as [`PlacesError::Api`]. Nothing is retried.

use std::time::Duration;

use btmsite_core::{Coordinate, Place, PlaceDetails};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::normalize::{normalize_details, normalize_place};
use crate::types::{
    DetailsResponse, Envelope, FindPlaceResponse, GeocodeResponse, NearbySearchResponse,
    PlaceResult,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";

const FIND_PLACE_PATH: &str = "maps/api/place/findplacefromtext/json";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";
const DETAILS_PATH: &str = "maps/api/place/details/json";
const GEOCODE_PATH: &str = "maps/api/geocode/json";

/// What a nearby search filters on: a free-text keyword or a place type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbyFilter<'a> {
    Keyword(&'a str),
    Category(&'a str),
}

/// Build a `reqwest::Client` with the configured timeout and `User-Agent`.
pub(crate) fn build_http_client(
    timeout_secs: u64,
    user_agent: &str,
) -> Result<Client, PlacesError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Ensure the base URL ends with exactly one slash so relative paths join
/// beneath it rather than replacing its last segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, PlacesError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Client for the Google Places / Geocoding web services.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            base_url: normalise_base_url(base_url)?,
        })
    }

    /// Resolves free text (an address or business name) to the best matching
    /// place, including its postal code when Google knows it.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::NotFound`] if there are no usable candidates.
    /// - [`PlacesError::Api`] if Google returns an error status.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or shape failures.
    pub async fn find_place(&self, input: &str) -> Result<Place, PlacesError> {
        let url = self.build_url(
            FIND_PLACE_PATH,
            &[
                ("input", input),
                ("inputtype", "textquery"),
                ("fields", "place_id,name,geometry,address_components"),
            ],
        )?;
        let response: FindPlaceResponse = self
            .get_envelope(&url, &format!("findplacefromtext(input={input})"))
            .await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| PlacesError::NotFound(format!("address '{input}'")))?;

        normalize_place(candidate).ok_or_else(|| PlacesError::InvalidData {
            context: format!("findplacefromtext(input={input})"),
            reason: "candidate is missing id, name, or geometry".to_string(),
        })
    }

    /// Lists places within `radius_meters` of `center` matching `filter`.
    ///
    /// A missing or empty result list is zero results, not an error. Records
    /// without an id, name, or location are skipped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if Google returns an error status.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or shape failures.
    pub async fn nearby_search(
        &self,
        center: Coordinate,
        radius_meters: f64,
        filter: NearbyFilter<'_>,
    ) -> Result<Vec<Place>, PlacesError> {
        let results = self.nearby_results(center, radius_meters, filter).await?;

        let total = results.len();
        let places: Vec<Place> = results.into_iter().filter_map(normalize_place).collect();
        if places.len() < total {
            tracing::debug!(
                skipped = total - places.len(),
                "nearby search returned incomplete records"
            );
        }
        Ok(places)
    }

    /// Names of every nearby result, including records that lack an id or a
    /// location. Kiosk scans only look at names.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::nearby_search`].
    pub async fn nearby_names(
        &self,
        center: Coordinate,
        radius_meters: f64,
        filter: NearbyFilter<'_>,
    ) -> Result<Vec<String>, PlacesError> {
        let results = self.nearby_results(center, radius_meters, filter).await?;
        Ok(results.into_iter().filter_map(|r| r.name).collect())
    }

    async fn nearby_results(
        &self,
        center: Coordinate,
        radius_meters: f64,
        filter: NearbyFilter<'_>,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_meters.to_string();
        let (filter_key, filter_value) = match filter {
            NearbyFilter::Keyword(k) => ("keyword", k),
            NearbyFilter::Category(c) => ("type", c),
        };
        let url = self.build_url(
            NEARBY_SEARCH_PATH,
            &[
                ("location", &location),
                ("radius", &radius),
                (filter_key, filter_value),
            ],
        )?;
        let response: NearbySearchResponse = self
            .get_envelope(
                &url,
                &format!("nearbysearch({location}, {filter_key}={filter_value})"),
            )
            .await?;
        Ok(response.results)
    }

    /// Fetches display name, category tags, and opening hours for a place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::NotFound`] if the response carries no `result`.
    /// - [`PlacesError::Api`] if Google returns an error status.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or shape failures.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            DETAILS_PATH,
            &[("place_id", place_id), ("fields", "name,types,opening_hours")],
        )?;
        let response: DetailsResponse = self
            .get_envelope(&url, &format!("details(place_id={place_id})"))
            .await?;

        response
            .result
            .map(normalize_details)
            .ok_or_else(|| PlacesError::NotFound(format!("place details for {place_id}")))
    }

    /// Geocodes an address (typically a ZIP code) to its centroid.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::NotFound`] if nothing matches.
    /// - [`PlacesError::Api`] if Google returns an error status.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or shape failures.
    pub async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError> {
        let url = self.build_url(GEOCODE_PATH, &[("address", address)])?;
        let response: GeocodeResponse = self
            .get_envelope(&url, &format!("geocode(address={address})"))
            .await?;

        response
            .results
            .into_iter()
            .next()
            .map(|r| Coordinate {
                lat: r.geometry.location.lat,
                lng: r.geometry.location.lng,
            })
            .ok_or_else(|| PlacesError::NotFound(format!("ZIP code '{address}'")))
    }

    /// Builds the full request URL for `path` with percent-encoded query
    /// parameters, always appending the API key last.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, checks the Google
    /// envelope status, and deserializes the payload.
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        tracing::debug!(context, "google request");
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        check_status(&envelope.status, envelope.error_message.as_deref(), context)?;
        Ok(envelope.data)
    }
}

/// Maps a Google envelope status to an error. `OK` and `ZERO_RESULTS` pass.
fn check_status(status: &str, message: Option<&str>, context: &str) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "NOT_FOUND" => Err(PlacesError::NotFound(context.to_string())),
        other => Err(PlacesError::Api {
            status: other.to_string(),
            message: message.unwrap_or("no error message").to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
