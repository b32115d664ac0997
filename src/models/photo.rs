// src/models/photo.rs
// DOCUMENTATION: Photo reference resolution
// PURPOSE: Build fetchable image URLs from opaque photo references

use url::form_urlencoded;

/// Width used for card thumbnails
pub const THUMBNAIL_WIDTH: u32 = 400;

/// Turns opaque photo references into fetchable image URLs
/// DOCUMENTATION: Template is {base}/photo?maxwidth=..&photoreference=..&key=..
#[derive(Debug, Clone)]
pub struct PhotoUrlBuilder {
    base_url: String,
    api_key: String,
    default_max_width: u32,
}

impl PhotoUrlBuilder {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, default_max_width: u32) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            default_max_width,
        }
    }

    /// Full-size photo URL, `max_width` falls back to the configured default
    pub fn url(&self, photo_reference: &str, max_width: Option<u32>) -> String {
        let width = max_width.unwrap_or(self.default_max_width);
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("maxwidth", &width.to_string())
            .append_pair("photoreference", photo_reference)
            .append_pair("key", &self.api_key)
            .finish();

        format!("{}/photo?{}", self.base_url, query)
    }

    pub fn thumbnail_url(&self, photo_reference: &str) -> String {
        self.url(photo_reference, Some(THUMBNAIL_WIDTH))
    }
}
