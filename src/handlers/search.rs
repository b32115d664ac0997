// src/handlers/search.rs
// DOCUMENTATION: Search, details, categories and GeoJSON commands
// PURPOSE: Drive the places client and render results as terminal cards

use crate::errors::PlacesError;
use crate::models::{OpenStatus, Place, PhotoUrlBuilder, PlaceCategory, SearchQuery};
use crate::services::{PageOutcome, PlacesClient, SessionSnapshot};
use geo_types::Point;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";

/// Run a search, then follow up to `extra_pages` continuation tokens
/// DOCUMENTATION: A failed follow-up page keeps the cards already loaded
pub async fn run_search(
    client: &PlacesClient,
    photos: &PhotoUrlBuilder,
    query: SearchQuery,
    extra_pages: usize,
) -> Result<SessionSnapshot, PlacesError> {
    let origin = query.point();
    client.search(query).await?;

    for _ in 0..extra_pages {
        let snapshot = client.snapshot();
        // Mirrors swiping onto the last card
        if !snapshot.should_prefetch(snapshot.places.len().saturating_sub(1)) {
            break;
        }

        match client.load_next_page().await {
            Ok(PageOutcome::Applied { .. }) => {}
            Ok(PageOutcome::NoMorePages) | Ok(PageOutcome::Superseded) => break,
            Err(e) => {
                log::warn!("Stopped paging: {}", e);
                break;
            }
        }
    }

    let snapshot = client.snapshot();
    if snapshot.places.is_empty() {
        println!("No places found.");
    }
    for (index, place) in snapshot.places.iter().enumerate() {
        println!("{}", render_card(index, place, origin, photos));
    }
    if let Some(error) = &snapshot.page_error {
        println!("{}More results could not be loaded: {}{}", RED, error, RESET);
    } else if snapshot.has_more {
        println!("{}More results available (--pages N){}", DIM, RESET);
    }

    Ok(snapshot)
}

/// Print the details section for one place
/// DOCUMENTATION: A failed fetch prints placeholder text and still reports the error
pub async fn run_details(client: &PlacesClient, photos: &PhotoUrlBuilder, id: &str) -> Result<Place, PlacesError> {
    match client.get_details(id).await {
        Ok(place) => {
            println!("{}", render_details(&place, photos));
            Ok(place)
        }
        Err(e) => {
            println!("No information available");
            println!("No details available");
            Err(e)
        }
    }
}

/// First results page as a GeoJSON FeatureCollection
pub async fn run_geojson(client: &PlacesClient, query: SearchQuery) -> Result<String, PlacesError> {
    client.search(query).await?;
    let collection = client.snapshot().to_feature_collection();
    Ok(serde_json::to_string_pretty(&collection)?)
}

pub fn render_categories() -> String {
    PlaceCategory::ALL
        .iter()
        .map(|category| format!("{:<22} {}", category.key(), category.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One result card: name, distance, rating, open badge, address, thumbnail
pub fn render_card(index: usize, place: &Place, origin: Point<f64>, photos: &PhotoUrlBuilder) -> String {
    let mut lines = vec![format!(
        "{}{}. {}{}  ({})",
        BOLD,
        index + 1,
        place.name,
        RESET,
        format_distance(place.distance_meters(origin))
    )];

    let rating = place
        .rating
        .map(|rating| format!("{:.1}★", rating))
        .unwrap_or_else(|| "No rating".to_string());
    lines.push(format!("   {}  {}", rating, open_badge(place.open_status())));
    lines.push(format!("   {}", place.address));

    if let Some(reference) = place.primary_photo_reference() {
        lines.push(format!("   {}{}{}", DIM, photos.thumbnail_url(reference), RESET));
    }
    lines.push(format!("   {}id: {}{}", DIM, place.id, RESET));

    lines.join("\n")
}

pub fn render_details(place: &Place, photos: &PhotoUrlBuilder) -> String {
    let mut sections = vec![
        format!("{}{}{}", BOLD, place.name, RESET),
        format!("About\n{}", place.about_text()),
        format!("Details\n{}", place.contact_details()),
    ];

    let reviews = place.reviews.as_deref().unwrap_or_default();
    if !reviews.is_empty() {
        let rendered = reviews
            .iter()
            .map(|review| match &review.text {
                Some(text) => format!("{}\n  {}", review.headline(), text),
                None => review.headline(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("Reviews\n{}", rendered));
    }

    if !place.photo_references.is_empty() {
        let urls = place
            .photo_references
            .iter()
            .map(|reference| photos.url(reference, None))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("Photos\n{}", urls));
    }

    sections.join("\n\n")
}

fn open_badge(status: OpenStatus) -> String {
    match status {
        OpenStatus::Open => format!("{}Open{}", GREEN, RESET),
        OpenStatus::Closed => format!("{}Closed{}", RED, RESET),
        OpenStatus::Unknown => "Hours unknown".to_string(),
    }
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
