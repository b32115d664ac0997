// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod cache;
pub mod google_places_client;
pub mod places_client;
pub mod session;
pub mod transport;

#[cfg(test)]
pub mod mock_transport;

pub use cache::*;
pub use google_places_client::*;
pub use places_client::*;
pub use session::*;
pub use transport::*;
