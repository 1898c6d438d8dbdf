//! Composite stream ids of the form `series:season:episode`.

use crate::error::{CatalogError, Result};

/// A parsed stream id. Parts borrow from the original key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeId<'a> {
    pub series_id: &'a str,
    pub season: &'a str,
    pub episode: &'a str,
}

impl<'a> CompositeId<'a> {
    /// Split a key on `:` positionally.
    ///
    /// Fewer than three parts is malformed. Parts past the third are ignored.
    /// Colons inside a part cannot be escaped.
    pub fn parse(key: &'a str) -> Result<Self> {
        let mut parts = key.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(series_id), Some(season), Some(episode)) => Ok(Self {
                series_id,
                season,
                episode,
            }),
            _ => Err(CatalogError::malformed_stream_id(key)),
        }
    }

    /// Stream title, built from the key text rather than the stored numbers.
    pub fn title(&self) -> String {
        format!("S{}E{}", self.season, self.episode)
    }
}
