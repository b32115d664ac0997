// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Domain place record, search parameters and presentation helpers

use geo_types::Point;
use geojson::{Feature, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationError};

use super::{PlaceCategory, Review};

/// Mean Earth radius used for great-circle distances
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Largest radius accepted by the nearby-search endpoint
pub const MAX_RADIUS_METERS: u32 = 50_000;

/// A point of interest returned by the Places API
/// DOCUMENTATION: Search results carry the summary fields only
/// phone, website, about, formatted_address and reviews appear after a detail fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Places identifier, primary key for caching and deduplication
    pub id: String,

    pub name: String,

    /// Short address (vicinity)
    pub address: String,

    pub latitude: f64,
    pub longitude: f64,

    /// Rating (0-5)
    pub rating: Option<f64>,

    /// Tri-state: open, closed, unknown
    pub open_now: Option<bool>,

    /// Ordered photo references; the first one is the card image
    pub photo_references: Vec<String>,

    pub reviews: Option<Vec<Review>>,

    pub phone: Option<String>,
    pub website: Option<String>,

    /// Editorial summary
    pub about: Option<String>,

    pub formatted_address: Option<String>,
}

/// Open/closed badge state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpenStatus {
    Open,
    Closed,
    Unknown,
}

impl Place {
    /// Minimal place with only the required fields set
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Place {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
            rating: None,
            open_now: None,
            photo_references: Vec::new(),
            reviews: None,
            phone: None,
            website: None,
            about: None,
            formatted_address: None,
        }
    }

    pub fn coordinate(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance_meters(&self, from: Point<f64>) -> f64 {
        let (lat1, lat2) = (from.y().to_radians(), self.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (self.longitude - from.x()).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
    }

    pub fn primary_photo_reference(&self) -> Option<&str> {
        self.photo_references.first().map(String::as_str)
    }

    pub fn open_status(&self) -> OpenStatus {
        match self.open_now {
            Some(true) => OpenStatus::Open,
            Some(false) => OpenStatus::Closed,
            None => OpenStatus::Unknown,
        }
    }

    /// "About" section text, with the placeholder shown when no summary exists
    pub fn about_text(&self) -> String {
        self.about
            .clone()
            .unwrap_or_else(|| "No information available".to_string())
    }

    /// Contact lines for the details section
    pub fn contact_details(&self) -> String {
        let mut lines = Vec::new();
        if let Some(phone) = &self.phone {
            lines.push(format!("Phone: {}", phone));
        }
        if let Some(website) = &self.website {
            lines.push(format!("Website: {}", website));
        }
        if let Some(address) = &self.formatted_address {
            lines.push(format!("Address: {}", address));
        }

        if lines.is_empty() {
            "No details available".to_string()
        } else {
            lines.join("\n")
        }
    }

    /// GeoJSON point feature carrying the card fields as properties
    pub fn to_geojson_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), json!(self.id));
        properties.insert("name".to_string(), json!(self.name));
        properties.insert("address".to_string(), json!(self.address));
        properties.insert("rating".to_string(), json!(self.rating));
        properties.insert("open_now".to_string(), json!(self.open_now));

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                self.longitude,
                self.latitude,
            ]))),
            id: Some(geojson::feature::Id::String(self.id.clone())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Nearby-search parameters
/// DOCUMENTATION: A change to any field starts a new search session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(range(min = -90.0, max = 90.0), custom = "finite")]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0), custom = "finite")]
    pub longitude: f64,

    /// Search radius in meters
    #[validate(range(min = 1, max = 50000))]
    pub radius_meters: u32,

    pub category: PlaceCategory,
}

impl SearchQuery {
    pub fn new(point: Point<f64>, radius_meters: u32, category: PlaceCategory) -> Self {
        SearchQuery {
            latitude: point.y(),
            longitude: point.x(),
            radius_meters,
            category,
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Place {
        Place::new("ChIJ123", "Test Restaurant", "MG Road", 12.9716, 77.5946)
    }

    #[test]
    fn test_distance_meters() {
        let place = sample();
        assert!(place.distance_meters(place.coordinate()) < 1e-6);

        // Bengaluru to Chennai is roughly 290 km as the crow flies
        let chennai = Point::new(80.2707, 13.0827);
        let km = place.distance_meters(chennai) / 1000.0;
        assert!((280.0..305.0).contains(&km), "got {} km", km);
    }

    #[test]
    fn test_about_and_contact_placeholders() {
        let mut place = sample();
        assert_eq!(place.about_text(), "No information available");
        assert_eq!(place.contact_details(), "No details available");

        place.about = Some("Family run since 1952".to_string());
        place.phone = Some("080 1234 5678".to_string());
        place.formatted_address = Some("1 MG Road, Bengaluru".to_string());

        assert_eq!(place.about_text(), "Family run since 1952");
        assert_eq!(
            place.contact_details(),
            "Phone: 080 1234 5678\nAddress: 1 MG Road, Bengaluru"
        );
    }

    #[test]
    fn test_open_status() {
        let mut place = sample();
        assert_eq!(place.open_status(), OpenStatus::Unknown);
        place.open_now = Some(false);
        assert_eq!(place.open_status(), OpenStatus::Closed);
        place.open_now = Some(true);
        assert_eq!(place.open_status(), OpenStatus::Open);
    }

    #[test]
    fn test_geojson_feature() {
        let feature = sample().to_geojson_feature();
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"][0], 77.5946);
        assert_eq!(value["properties"]["name"], "Test Restaurant");
        assert_eq!(value["id"], "ChIJ123");
    }

    #[test]
    fn test_search_query_validation() {
        let ok = SearchQuery::new(Point::new(77.6, 12.9), 5000, PlaceCategory::Restaurant);
        assert!(ok.validate().is_ok());

        let zero_radius = SearchQuery { radius_meters: 0, ..ok.clone() };
        assert!(zero_radius.validate().is_err());

        let too_far = SearchQuery { radius_meters: MAX_RADIUS_METERS + 1, ..ok.clone() };
        assert!(too_far.validate().is_err());

        let bad_lat = SearchQuery { latitude: 91.0, ..ok.clone() };
        assert!(bad_lat.validate().is_err());

        let nan_lng = SearchQuery { longitude: f64::NAN, ..ok };
        assert!(nan_lng.validate().is_err());
    }
}
