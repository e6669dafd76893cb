//! Artwork catalog API client and types.
//!
//! This module provides the interface for fetching pages from the catalog
//! REST API.

mod client;
pub mod error;
pub mod types;

pub use client::ArticClient;
pub use error::ApiError;
pub use types::{Artwork, ArtworkPage};
