//! Artwork catalog API response types.
//!
//! These types model the `GET /artworks` listing response of the Art Institute
//! of Chicago public API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One page of the artwork listing.
///
/// Returned by `GET /artworks?page={n}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkPage {
    /// The artworks on this page. Required: a body without it is malformed.
    pub data: Vec<Artwork>,
    /// Pagination info for the whole collection.
    pub pagination: Pagination,
}

impl ArtworkPage {
    /// Total number of records across all pages.
    pub fn total(&self) -> u64 {
        self.pagination.total
    }

    /// Number of artworks on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Pagination metadata.
///
/// Only `total` is relied upon; the rest is informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of matching records.
    pub total: u64,
    /// Page size the server used.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Offset of the first record on this page.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Number of pages at this page size.
    #[serde(default)]
    pub total_pages: Option<u64>,
    /// The 1-based page the server returned.
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// An artwork record.
///
/// The API sends `null` for missing values and integers for dates, so every
/// text field accepts a string, a number, or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// The unique artwork id.
    pub id: u64,
    /// The artwork title.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    /// Where the artwork was made.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub place_of_origin: String,
    /// Artist name with nationality and lifespan, as displayed by the museum.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub artist_display: String,
    /// Inscriptions on the work.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub inscriptions: String,
    /// Earliest creation date.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub date_start: String,
    /// Latest creation date.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub date_end: String,
}

impl Artwork {
    /// Create an artwork with only an id and title set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            place_of_origin: String::new(),
            artist_display: String::new(),
            inscriptions: String::new(),
            date_start: String::new(),
            date_end: String::new(),
        }
    }

    /// The artist display string collapsed onto a single line.
    ///
    /// The API separates name and lifespan with a newline.
    pub fn artist_line(&self) -> String {
        self.artist_display
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.title)
    }
}

/// Deserialize a string, number, or null into a `String`.
fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
