// src/lib.rs
// DOCUMENTATION: Nearby places client library
// PURPOSE: Search sessions, detail cache and favorites over the Google Places API

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use errors::PlacesError;
pub use models::{Place, PlaceCategory, Review, SearchQuery};
pub use services::{PageOutcome, PlaceCache, PlacesClient, SessionSnapshot, SessionStatus};
