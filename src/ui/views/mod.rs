//! Application views (screens).

mod artworks;

pub use artworks::{ArtworksAction, ArtworksView};
