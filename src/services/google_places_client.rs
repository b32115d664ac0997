// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Build nearby-search, next-page and details requests and decode their responses

use crate::config::DEFAULT_BASE_URL;
use crate::errors::PlacesError;
use crate::models::{PhotoUrlBuilder, Place, Review, SearchQuery};
use crate::services::transport::HttpTransport;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError};
use std::sync::Arc;

/// Google Places API client
/// DOCUMENTATION: Handles authentication, request building and decoding
/// Holds no session state; see PlacesClient for pagination and caching
pub struct GooglePlacesClient {
    /// Transport used for every request
    transport: Arc<dyn HttpTransport>,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
}

/// One decoded page of nearby-search results
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub places: Vec<Place>,
    /// Continuation token, absent on the last page
    pub next_page_token: Option<String>,
}

/// Response from Google Places Nearby Search
#[derive(Debug, Deserialize)]
pub struct GooglePlacesResponse {
    #[serde(default)]
    pub results: Vec<GooglePlace>,
    /// Status of the API call; treated as OK when missing
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Response from Google Place Details
#[derive(Debug, Deserialize)]
pub struct GoogleDetailsResponse {
    #[serde(default)]
    pub result: Option<GooglePlace>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Individual place from Google Places API
/// DOCUMENTATION: place_id, name and geometry are required
/// Optional fields that are missing or malformed decode to None
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlace {
    pub place_id: String,
    pub name: String,
    pub geometry: GoogleGeometry,
    /// Short address (Nearby Search)
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub vicinity: Option<String>,
    /// Detailed address (Place Details)
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub opening_hours: Option<GoogleOpeningHours>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub editorial_summary: Option<GoogleEditorialSummary>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub website: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub reviews: Option<Vec<GoogleReview>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub photos: Option<Vec<GooglePhoto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleGeometry {
    pub location: GoogleLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleEditorialSummary {
    #[serde(default)]
    pub overview: Option<String>,
}

/// Review from Google Places
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleReview {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub text: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub relative_time_description: Option<String>,
}

/// Photo from Google Places
/// A malformed reference drops only this entry, not the whole list
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePhoto {
    /// Photo reference (used to fetch actual photo)
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub photo_reference: Option<String>,
}

impl GooglePlace {
    /// Convert wire record into the domain Place
    pub fn into_place(self) -> Place {
        let photo_references = self
            .photos
            .unwrap_or_default()
            .into_iter()
            .filter_map(|photo| photo.photo_reference)
            .filter(|reference| !reference.is_empty())
            .collect();

        let reviews = self.reviews.map(|reviews| {
            reviews
                .into_iter()
                .map(|review| Review {
                    author_name: review.author_name,
                    profile_photo_url: review.profile_photo_url,
                    rating: review.rating,
                    text: review.text,
                    relative_time_description: review.relative_time_description,
                })
                .collect()
        });

        Place {
            id: self.place_id,
            name: self.name,
            // Prefer vicinity for the card, details responses may only carry formatted_address
            address: self
                .vicinity
                .clone()
                .or_else(|| self.formatted_address.clone())
                .unwrap_or_default(),
            latitude: self.geometry.location.lat,
            longitude: self.geometry.location.lng,
            rating: self.rating,
            open_now: self.opening_hours.and_then(|hours| hours.open_now),
            photo_references,
            reviews,
            phone: self.formatted_phone_number,
            website: self.website,
            about: self.editorial_summary.and_then(|summary| summary.overview),
            formatted_address: self.formatted_address,
        }
    }
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    pub fn new(api_key: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, transport)
    }

    /// Create a client against a non-default API root
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get API key
    pub fn get_api_key(&self) -> &str {
        &self.api_key
    }

    /// Photo URL builder sharing this client's root and credential
    pub fn photo_urls(&self, default_max_width: u32) -> PhotoUrlBuilder {
        PhotoUrlBuilder::new(self.base_url.clone(), self.api_key.clone(), default_max_width)
    }

    /// Perform nearby search for places (first page)
    /// DOCUMENTATION: Sends location, radius, keyword, optional type and key
    pub async fn nearby_search(&self, query: &SearchQuery) -> Result<SearchPage, PlacesError> {
        let url = format!("{}/nearbysearch/json", self.base_url);

        let mut params = vec![
            ("location", format!("{},{}", query.latitude, query.longitude)),
            ("radius", query.radius_meters.to_string()),
            ("keyword", query.category.label().to_string()),
        ];
        if let Some(api_type) = query.category.api_type() {
            params.push(("type", api_type.to_string()));
        }
        params.push(("key", self.api_key.clone()));

        log::debug!(
            "Google Places nearby search: lat={}, lng={}, radius={}, category={}",
            query.latitude,
            query.longitude,
            query.radius_meters,
            query.category.key()
        );

        self.fetch_page(&url, &params).await
    }

    /// Fetch the page a continuation token points to
    /// DOCUMENTATION: The token encodes the first query, no other parameters are sent
    pub async fn next_page(&self, page_token: &str) -> Result<SearchPage, PlacesError> {
        if page_token.is_empty() {
            return Err(PlacesError::InvalidRequest(
                "Empty continuation token".to_string(),
            ));
        }

        let url = format!("{}/nearbysearch/json", self.base_url);
        let params = [
            ("pagetoken", page_token.to_string()),
            ("key", self.api_key.clone()),
        ];

        log::debug!("Google Places next page request");

        self.fetch_page(&url, &params).await
    }

    /// Get detailed information about a specific place
    pub async fn place_details(&self, place_id: &str) -> Result<Place, PlacesError> {
        if place_id.is_empty() {
            return Err(PlacesError::InvalidRequest("Empty place id".to_string()));
        }

        let url = format!("{}/details/json", self.base_url);
        let params = [
            ("place_id", place_id.to_string()),
            ("key", self.api_key.clone()),
        ];

        log::debug!("Google Places details lookup: place_id={}", place_id);

        let body = self.transport.get(&url, &params).await?;
        let api_response: GoogleDetailsResponse = serde_json::from_slice(&body).map_err(|e| {
            log::error!("Failed to parse Google Places details: {}", e);
            PlacesError::DecodeFailure(format!("Parse error: {}", e))
        })?;

        check_status(api_response.status.as_deref(), api_response.error_message)?;

        api_response
            .result
            .map(GooglePlace::into_place)
            .ok_or_else(|| PlacesError::DecodeFailure("Details response has no result".to_string()))
    }

    async fn fetch_page(&self, url: &str, params: &[(&str, String)]) -> Result<SearchPage, PlacesError> {
        let body = self.transport.get(url, params).await?;

        let api_response: GooglePlacesResponse = serde_json::from_slice(&body).map_err(|e| {
            log::error!("Failed to parse Google Places response: {}", e);
            PlacesError::DecodeFailure(format!("Parse error: {}", e))
        })?;

        check_status(api_response.status.as_deref(), api_response.error_message)?;

        log::info!(
            "Google Places search returned {} results",
            api_response.results.len()
        );

        Ok(SearchPage {
            places: api_response
                .results
                .into_iter()
                .map(GooglePlace::into_place)
                .collect(),
            next_page_token: api_response
                .next_page_token
                .filter(|token| !token.is_empty()),
        })
    }
}

/// Check API response status
/// DOCUMENTATION: OK and ZERO_RESULTS succeed; everything else is a typed failure
fn check_status(status: Option<&str>, error_message: Option<String>) -> Result<(), PlacesError> {
    let status = match status {
        None | Some("OK") | Some("ZERO_RESULTS") => return Ok(()),
        Some(status) => status,
    };

    let message = error_message.unwrap_or_else(|| format!("Unexpected status: {}", status));

    match status {
        "OVER_QUERY_LIMIT" => {
            log::error!("Google Places API quota exceeded");
            Err(PlacesError::RateLimitExceeded)
        }
        "INVALID_REQUEST" => {
            log::error!("Google Places API rejected request: {}", message);
            Err(PlacesError::InvalidRequest(message))
        }
        other => {
            log::error!("Google Places API status {}: {}", other, message);
            Err(PlacesError::server(other, message))
        }
    }
}
