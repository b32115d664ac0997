// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Default Places API root used by every endpoint
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Client configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Places API Key
    pub google_places_api_key: String,

    /// Places API root (overridable for proxies)
    pub places_base_url: String,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Client-side request quota
    pub requests_per_second: u32,

    /// Width requested for full-size photos
    pub photo_max_width: u32,

    /// Radius used when a search does not specify one
    pub default_radius_meters: u32,

    /// Location of the favorites document
    pub favorites_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            google_places_api_key: String::new(),
            places_base_url: DEFAULT_BASE_URL.to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: 15,
            requests_per_second: 10,
            photo_max_width: 1600,
            default_radius_meters: 5000,
            favorites_path: PathBuf::from("favorites.json"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Config::default();

        Config {
            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY")
                .unwrap_or_else(|_| String::new()),

            places_base_url: env::var("PLACES_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.places_base_url),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),

            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),

            requests_per_second: parse_or("REQUESTS_PER_SECOND", defaults.requests_per_second),

            photo_max_width: parse_or("PHOTO_MAX_WIDTH", defaults.photo_max_width),

            default_radius_meters: parse_or(
                "DEFAULT_RADIUS_METERS",
                defaults.default_radius_meters,
            ),

            favorites_path: env::var("FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.favorites_path),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures the client can be built safely
    pub fn validate(&self) -> Result<(), String> {
        if self.places_base_url.is_empty() {
            return Err("PLACES_BASE_URL must not be empty".to_string());
        }

        if self.photo_max_width == 0 {
            return Err("PHOTO_MAX_WIDTH must be positive".to_string());
        }

        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - requests will be denied");
        }

        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
