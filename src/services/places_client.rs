// src/services/places_client.rs
// DOCUMENTATION: Places client facade used by the presentation layer
// PURPOSE: Search sessions with pagination, detail lookups through the cache

use crate::errors::PlacesError;
use crate::models::{Place, SearchQuery};
use crate::services::cache::PlaceCache;
use crate::services::google_places_client::GooglePlacesClient;
use crate::services::session::{SearchSession, SessionSnapshot, SessionStatus};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use validator::Validate;

/// What happened to the session as a result of one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// A page was merged into the current session
    Applied { added: usize, has_more: bool },
    /// No continuation token, nothing was requested
    NoMorePages,
    /// A newer search replaced the session this call belonged to
    Superseded,
}

/// Places client
/// DOCUMENTATION: Owns the current search session and publishes a snapshot
/// after every change. Each session carries a generation number; responses
/// that arrive for an older generation are dropped.
pub struct PlacesClient {
    api: GooglePlacesClient,
    cache: Arc<PlaceCache>,
    session: RwLock<SearchSession>,
    /// Serializes follow-up page requests so pages apply in request order
    page_lock: Mutex<()>,
    updates: watch::Sender<SessionSnapshot>,
}

impl PlacesClient {
    pub fn new(api: GooglePlacesClient, cache: Arc<PlaceCache>) -> Self {
        let session = SearchSession::idle();
        let (updates, _) = watch::channel(session.snapshot());

        Self {
            api,
            cache,
            session: RwLock::new(session),
            page_lock: Mutex::new(()),
            updates,
        }
    }

    /// Receiver that observes every session transition
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.updates.borrow().clone()
    }

    pub fn cache(&self) -> &Arc<PlaceCache> {
        &self.cache
    }

    pub fn api(&self) -> &GooglePlacesClient {
        &self.api
    }

    /// Start a new session and fetch its first page
    /// DOCUMENTATION: Any previous session (and its in-flight requests) is superseded.
    /// On failure the session ends up in the Failed state with no results.
    pub async fn search(&self, query: SearchQuery) -> Result<PageOutcome, PlacesError> {
        query.validate()?;

        let generation = {
            let mut session = self.session.write().await;
            let generation = session.generation() + 1;
            *session = SearchSession::new(generation, query.clone());
            self.publish(&session);
            generation
        };

        log::info!(
            "Search #{}: {} within {}m of ({}, {})",
            generation,
            query.category.key(),
            query.radius_meters,
            query.latitude,
            query.longitude
        );

        let result = tokio::select! {
            result = self.api.nearby_search(&query) => result,
            _ = self.superseded(generation) => {
                log::debug!("Search #{} superseded while in flight", generation);
                return Ok(PageOutcome::Superseded);
            }
        };

        let mut session = self.session.write().await;
        if session.generation() != generation {
            log::debug!("Discarding stale response for search #{}", generation);
            return Ok(PageOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                let added = session.apply_page(page.places, page.next_page_token);
                let has_more = session.has_more();
                self.publish(&session);
                log::info!("Search #{} returned {} places (more: {})", generation, added, has_more);
                Ok(PageOutcome::Applied { added, has_more })
            }
            Err(e) => {
                log::warn!("Search #{} failed: {}", generation, e);
                session.fail(&e);
                self.publish(&session);
                Err(e)
            }
        }
    }

    /// Fetch the next page of the current session
    /// DOCUMENTATION: Without a continuation token this is a no-op reporting NoMorePages.
    /// A failure keeps the accumulated results and the token, so the call can be retried.
    pub async fn load_next_page(&self) -> Result<PageOutcome, PlacesError> {
        // The call belongs to the session current when it was made, not when the lock frees
        let generation = self.session.read().await.generation();
        let _page_guard = self.page_lock.lock().await;

        let token = {
            let session = self.session.read().await;
            if session.generation() != generation {
                log::debug!("Queued page request for search #{} superseded", generation);
                return Ok(PageOutcome::Superseded);
            }
            match (session.status(), session.next_page_token()) {
                (SessionStatus::Ready, Some(token)) => token.to_string(),
                _ => return Ok(PageOutcome::NoMorePages),
            }
        };

        let result = tokio::select! {
            result = self.api.next_page(&token) => result,
            _ = self.superseded(generation) => {
                log::debug!("Page request for search #{} superseded", generation);
                return Ok(PageOutcome::Superseded);
            }
        };

        let mut session = self.session.write().await;
        if session.generation() != generation {
            return Ok(PageOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                let added = session.apply_page(page.places, page.next_page_token);
                let has_more = session.has_more();
                self.publish(&session);
                log::info!(
                    "Search #{} next page added {} places, {} total",
                    generation,
                    added,
                    session.places().len()
                );
                Ok(PageOutcome::Applied { added, has_more })
            }
            Err(e) => {
                log::warn!("Next page for search #{} failed: {}", generation, e);
                session.record_page_error(&e);
                self.publish(&session);
                Err(e)
            }
        }
    }

    /// Full record for one place
    /// DOCUMENTATION: Served from the cache when present, otherwise fetched once and cached
    pub async fn get_details(&self, id: &str) -> Result<Place, PlacesError> {
        if id.is_empty() {
            return Err(PlacesError::InvalidRequest("Empty place id".to_string()));
        }

        self.cache
            .get_or_try_insert_with(id, || self.api.place_details(id))
            .await
    }

    /// Cached record without any network access
    pub async fn cached(&self, id: &str) -> Option<Place> {
        self.cache.get(id).await
    }

    /// Details for each favorite id in order
    /// Ids that fail to resolve are skipped, repeated ids appear once
    pub async fn resolve_favorites(&self, ids: &[String]) -> Vec<Place> {
        let mut seen = HashSet::new();
        let mut places = Vec::with_capacity(ids.len());

        for id in ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            match self.get_details(id).await {
                Ok(place) => places.push(place),
                Err(e) => log::warn!("Skipping favorite {}: {}", id, e),
            }
        }

        places
    }

    fn publish(&self, session: &SearchSession) {
        self.updates.send_replace(session.snapshot());
    }

    // Resolves once a session newer than `generation` has been published
    async fn superseded(&self, generation: u64) {
        let mut updates = self.updates.subscribe();
        if updates
            .wait_for(|snapshot| snapshot.generation != generation)
            .await
            .is_err()
        {
            std::future::pending::<()>().await;
        }
    }
}
