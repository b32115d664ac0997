// src/services/session.rs
// DOCUMENTATION: State of one nearby-search session
// PURPOSE: Accumulate deduplicated result pages and track the continuation token

use crate::errors::PlacesError;
use crate::models::{Place, SearchQuery};
use chrono::{DateTime, Utc};
use geojson::FeatureCollection;
use serde::Serialize;
use std::collections::HashSet;

/// Lifecycle of a search session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionStatus {
    /// No search has started yet
    Idle,
    /// First page requested
    Loading,
    /// At least the first page is applied
    Ready,
    /// First page failed; no results are shown
    Failed(String),
}

/// Results of one query
/// DOCUMENTATION: Replaced wholesale when any query parameter changes
/// Invariant: no two entries in `places` share an id
#[derive(Debug)]
pub struct SearchSession {
    generation: u64,
    query: Option<SearchQuery>,
    places: Vec<Place>,
    seen_ids: HashSet<String>,
    next_page_token: Option<String>,
    status: SessionStatus,
    page_error: Option<String>,
    started_at: DateTime<Utc>,
}

impl SearchSession {
    /// Placeholder session before the first search
    pub fn idle() -> Self {
        Self {
            generation: 0,
            query: None,
            places: Vec::new(),
            seen_ids: HashSet::new(),
            next_page_token: None,
            status: SessionStatus::Idle,
            page_error: None,
            started_at: Utc::now(),
        }
    }

    /// Fresh session awaiting its first page
    pub fn new(generation: u64, query: SearchQuery) -> Self {
        Self {
            generation,
            query: Some(query),
            status: SessionStatus::Loading,
            ..Self::idle()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }

    /// Append a page, dropping ids already seen in this session
    /// DOCUMENTATION: Order within the page is kept; the token is replaced
    /// by the one returned with the page (or cleared). Returns the number added.
    pub fn apply_page(&mut self, places: Vec<Place>, next_page_token: Option<String>) -> usize {
        let before = self.places.len();

        for place in places {
            if self.seen_ids.insert(place.id.clone()) {
                self.places.push(place);
            } else {
                log::debug!("Dropping duplicate place {} from page", place.id);
            }
        }

        self.next_page_token = next_page_token;
        self.status = SessionStatus::Ready;
        self.page_error = None;

        self.places.len() - before
    }

    /// First page failed: no partial results survive
    pub fn fail(&mut self, error: &PlacesError) {
        self.places.clear();
        self.seen_ids.clear();
        self.next_page_token = None;
        self.status = SessionStatus::Failed(error.to_string());
    }

    /// Follow-up page failed: results and token stay for a retry
    pub fn record_page_error(&mut self, error: &PlacesError) {
        self.page_error = Some(error.to_string());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            query: self.query.clone(),
            status: self.status.clone(),
            places: self.places.clone(),
            has_more: self.has_more(),
            page_error: self.page_error.clone(),
            started_at: self.started_at,
        }
    }
}

/// Read-only view of a session published to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub query: Option<SearchQuery>,
    pub status: SessionStatus,
    pub places: Vec<Place>,
    pub has_more: bool,
    /// Last pagination failure, cleared by the next applied page
    pub page_error: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn ids(&self) -> Vec<&str> {
        self.places.iter().map(|place| place.id.as_str()).collect()
    }

    /// True when `index` is the last card and another page exists
    pub fn should_prefetch(&self, index: usize) -> bool {
        self.has_more && index + 1 == self.places.len()
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self
                .places
                .iter()
                .map(Place::to_geojson_feature)
                .collect(),
            foreign_members: None,
        }
    }
}
