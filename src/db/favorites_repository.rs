// src/db/favorites_repository.rs
// DOCUMENTATION: Local storage for favorite place ids
// PURPOSE: Ordered id set persisted as a small JSON document

use crate::errors::PlacesError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// On-disk layout: {"likedLocations": ["id", ...]}
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesDocument {
    #[serde(rename = "likedLocations", default)]
    liked_locations: Vec<String>,
}

/// Favorites store
/// DOCUMENTATION: Keeps insertion order, never holds the same id twice.
/// Every mutation is flushed before returning.
#[derive(Debug)]
pub struct FavoritesRepository {
    path: PathBuf,
    ids: Vec<String>,
}

impl FavoritesRepository {
    /// Load favorites from `path`; a missing file is an empty list
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PlacesError> {
        let path = path.into();

        let ids = match fs::read(&path).await {
            Ok(bytes) => {
                let document: FavoritesDocument = serde_json::from_slice(&bytes)?;
                dedup(document.liked_locations)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No favorites file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        log::info!("Loaded {} favorites from {}", ids.len(), path.display());
        Ok(Self { path, ids })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|liked| liked == id)
    }

    /// Append `id`; returns false when it was already a favorite
    pub async fn add(&mut self, id: &str) -> Result<bool, PlacesError> {
        if id.is_empty() {
            return Err(PlacesError::InvalidRequest("Empty place id".to_string()));
        }
        if self.contains(id) {
            return Ok(false);
        }

        let mut ids = self.ids.clone();
        ids.push(id.to_string());
        self.commit(ids).await?;
        Ok(true)
    }

    /// Returns false when `id` was not a favorite
    pub async fn remove(&mut self, id: &str) -> Result<bool, PlacesError> {
        if !self.contains(id) {
            return Ok(false);
        }

        let ids = self.ids.iter().filter(|liked| *liked != id).cloned().collect();
        self.commit(ids).await?;
        Ok(true)
    }

    /// Flip the liked state of `id` and return the new state
    pub async fn toggle(&mut self, id: &str) -> Result<bool, PlacesError> {
        if self.contains(id) {
            self.remove(id).await?;
            Ok(false)
        } else {
            self.add(id).await?;
            Ok(true)
        }
    }

    // Memory only changes once the new list is on disk
    async fn commit(&mut self, ids: Vec<String>) -> Result<(), PlacesError> {
        self.save(&ids).await?;
        self.ids = ids;
        Ok(())
    }

    // Write to a sibling temp file first, then rename over the real one
    async fn save(&self, ids: &[String]) -> Result<(), PlacesError> {
        let document = FavoritesDocument {
            liked_locations: ids.to_vec(),
        };
        let body = serde_json::to_vec_pretty(&document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, body).await?;
        fs::rename(&tmp_path, &self.path).await?;

        log::debug!("Saved {} favorites to {}", ids.len(), self.path.display());
        Ok(())
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !id.is_empty() && !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
