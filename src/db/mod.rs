// src/db/mod.rs
// DOCUMENTATION: Local storage module organization
// PURPOSE: Re-export storage components

pub mod favorites_repository;

pub use favorites_repository::*;
