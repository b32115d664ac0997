// src/handlers/favorites.rs
// DOCUMENTATION: Favorites commands
// PURPOSE: List liked places and toggle the liked state of one place

use crate::db::FavoritesRepository;
use crate::errors::PlacesError;
use crate::models::Place;
use crate::services::PlacesClient;

/// Print every favorite that still resolves
pub async fn run_list(client: &PlacesClient, favorites: &FavoritesRepository) -> Vec<Place> {
    let places = client.resolve_favorites(favorites.list()).await;

    if places.is_empty() {
        println!("No favorites yet. Use `like <place_id>` to add one.");
    }
    for line in render_favorites(&places) {
        println!("{}", line);
    }

    let missing = favorites.list().len() - places.len();
    if missing > 0 {
        println!("({} favorites could not be loaded)", missing);
    }

    places
}

/// Toggle `id`; the new state is printed and returned
pub async fn run_like(favorites: &mut FavoritesRepository, id: &str) -> Result<bool, PlacesError> {
    let liked = favorites.toggle(id).await?;
    if liked {
        println!("Added {} to favorites", id);
    } else {
        println!("Removed {} from favorites", id);
    }
    Ok(liked)
}

pub fn render_favorites(places: &[Place]) -> Vec<String> {
    places
        .iter()
        .map(|place| format!("♥ {} - {} ({})", place.name, place.address, place.id))
        .collect()
}
