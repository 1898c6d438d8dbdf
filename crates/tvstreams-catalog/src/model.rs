//! Catalog data model and wire shapes.
//!
//! The ingestion types ([`Series`], [`Season`], [`Episode`]) mirror the JSON
//! documents produced by the data preparation tooling. They are tolerant of
//! missing fields: a gap in the data is a lookup miss later, never a decode
//! failure.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Ingestion model
// ---------------------------------------------------------------------------

/// One show in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// External identifier (usually an IMDb id such as `tt0944947`).
    pub id: String,
    /// Display name, searched case-insensitively.
    #[serde(default)]
    pub name: String,
    /// Poster image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    /// Seasons in document order.
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl Series {
    /// Find the first season whose number loosely equals `number`.
    pub fn season(&self, number: &str) -> Option<&Season> {
        self.seasons
            .iter()
            .find(|s| s.season.as_ref().is_some_and(|n| n.matches(number)))
    }

    /// Project this series into its catalog summary.
    pub fn preview(&self, content_type: &str) -> MetaPreview {
        MetaPreview {
            id: self.id.clone(),
            content_type: content_type.to_string(),
            name: self.name.clone(),
            poster: self.poster.clone(),
        }
    }
}

/// One season of a [`Series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub season: Option<LooseNumber>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Season {
    /// Find the first episode whose number loosely equals `number`.
    pub fn episode(&self, number: &str) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.episode.as_ref().is_some_and(|n| n.matches(number)))
    }
}

/// One streamable episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub episode: Option<LooseNumber>,
    #[serde(default)]
    pub stream_url: Option<String>,
}

impl Episode {
    /// The stream URL, if present and not blank.
    pub fn playable_url(&self) -> Option<&str> {
        self.stream_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// Decode one ingestion document: a JSON array of series objects.
pub fn parse_document(json: &str) -> Result<Vec<Series>> {
    Ok(serde_json::from_str(json)?)
}

// ---------------------------------------------------------------------------
// Loose numbers
// ---------------------------------------------------------------------------

/// A season or episode number as it arrived in the data.
///
/// Documents carry these either as JSON numbers or as strings, and lookups
/// always arrive as text. Comparison goes through [`LooseNumber::matches`],
/// which normalizes both sides to a numeric value before comparing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(serde_json::Number),
    Text(String),
}

impl LooseNumber {
    /// Numeric value, if this is a number or numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            LooseNumber::Text(t) => parse_numeric(t),
        }
    }

    /// Loose equality against a textual key.
    ///
    /// Numeric on both sides compares by value (`1 == "01" == "1.0"`).
    /// Otherwise falls back to exact trimmed text equality.
    pub fn matches(&self, key: &str) -> bool {
        match (self.as_f64(), parse_numeric(key)) {
            (Some(a), Some(b)) => a == b,
            (Some(_), None) | (None, Some(_)) => false,
            (None, None) => match self {
                LooseNumber::Text(t) => t.trim() == key.trim(),
                LooseNumber::Number(_) => false,
            },
        }
    }
}

impl fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseNumber::Number(n) => write!(f, "{}", n),
            LooseNumber::Text(t) => write!(f, "{}", t),
        }
    }
}

impl From<u32> for LooseNumber {
    fn from(n: u32) -> Self {
        LooseNumber::Number(n.into())
    }
}

impl From<&str> for LooseNumber {
    fn from(s: &str) -> Self {
        LooseNumber::Text(s.to_string())
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// Summary of a series as returned by catalog and meta queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// A playable stream for one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub title: String,
    pub url: String,
}

/// Response body for catalog listing and search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
}

/// Response body for meta lookups. Serializes to `{}` when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaPreview>,
}

/// Response body for stream lookups. Holds at most one stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamsResponse {
    pub streams: Vec<Stream>,
}
