// src/services/mock_transport.rs
// DOCUMENTATION: Scripted HttpTransport for unit tests
// PURPOSE: Drive the Places clients without network access

use crate::errors::PlacesError;
use crate::services::transport::HttpTransport;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Which Places endpoint a request targeted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Nearby,
    NextPage(String),
    Details(String),
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub route: Route,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

struct Scripted {
    route: Route,
    response: Result<Vec<u8>, PlacesError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Answers requests from a script, first matching entry wins
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<Vec<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, route: Route, body: Value) {
        self.push(route, Ok(body.to_string().into_bytes()), None);
    }

    pub fn respond_raw(&self, route: Route, body: &str) {
        self.push(route, Ok(body.as_bytes().to_vec()), None);
    }

    pub fn fail(&self, route: Route, error: PlacesError) {
        self.push(route, Err(error), None);
    }

    /// Response is held back until the returned sender fires or is dropped
    pub fn respond_gated(&self, route: Route, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(route, Ok(body.to_string().into_bytes()), Some(rx));
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, route: &Route) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| &call.route == route)
            .count()
    }

    fn push(&self, route: Route, response: Result<Vec<u8>, PlacesError>, gate: Option<oneshot::Receiver<()>>) {
        self.script.lock().unwrap().push(Scripted {
            route,
            response,
            gate,
        });
    }
}

fn route_of(url: &str, params: &[(&str, String)]) -> Route {
    let param = |name: &str| {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    };

    if url.ends_with("/details/json") {
        Route::Details(param("place_id").unwrap_or_default())
    } else if let Some(token) = param("pagetoken") {
        Route::NextPage(token)
    } else {
        Route::Nearby
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>, PlacesError> {
        let route = route_of(url, params);
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            route: route.clone(),
        });

        let scripted = {
            let mut script = self.script.lock().unwrap();
            script
                .iter()
                .position(|entry| entry.route == route)
                .map(|index| script.remove(index))
        };

        let Some(scripted) = scripted else {
            return Err(PlacesError::TransportFailure(format!(
                "unscripted request: {:?}",
                route
            )));
        };

        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }

        scripted.response
    }
}

/// Minimal search-result record
pub fn place_json(id: &str) -> Value {
    json!({
        "place_id": id,
        "name": format!("Place {}", id),
        "vicinity": "MG Road, Bengaluru",
        "geometry": { "location": { "lat": 12.97, "lng": 77.59 } },
        "rating": 4.2,
        "opening_hours": { "open_now": true },
        "photos": [ { "photo_reference": format!("photo-{}", id) } ]
    })
}

/// Nearby-search response body for the given ids
pub fn nearby_json(ids: &[&str], next_page_token: Option<&str>) -> Value {
    let mut body = json!({
        "status": if ids.is_empty() { "ZERO_RESULTS" } else { "OK" },
        "results": ids.iter().map(|id| place_json(id)).collect::<Vec<_>>(),
    });
    if let Some(token) = next_page_token {
        body["next_page_token"] = json!(token);
    }
    body
}

/// Place-details response body with the detail-only fields filled in
pub fn details_json(id: &str) -> Value {
    let mut result = place_json(id);
    result["formatted_address"] = json!("1 MG Road, Bengaluru 560001");
    result["formatted_phone_number"] = json!("080 1234 5678");
    result["website"] = json!("https://example.com");
    result["editorial_summary"] = json!({ "overview": "Family run since 1952" });
    result["reviews"] = json!([
        {
            "author_name": "Asha",
            "rating": 5,
            "text": "Great dosa",
            "relative_time_description": "a month ago"
        }
    ]);

    json!({ "status": "OK", "result": result })
}
