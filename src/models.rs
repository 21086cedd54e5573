use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single catalogue item.
///
/// Optional columns default to empty strings (or `None`) at load time so the
/// ranking code never has to deal with missing fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtworkRecord {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub suburb: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl ArtworkRecord {
    /// Record with a fresh id and every optional field empty.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            artist: artist.into(),
            price_range: String::new(),
            price: None,
            suburb: String::new(),
            tags: Vec::new(),
            style: String::new(),
            medium: String::new(),
            image_ref: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_suburb(mut self, suburb: impl Into<String>) -> Self {
        self.suburb = suburb.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Outcome of one ranking pass.
#[derive(Debug, Clone, Default)]
pub struct RankedResult {
    /// The oracle's reply text, absent when it failed or was not consulted
    pub explanation: Option<String>,
    /// Message for the end user when the oracle failed
    pub advisory: Option<String>,
    /// Every input artwork exactly once, best first
    pub artworks: Vec<ArtworkRecord>,
    /// Ids of the leading results to highlight
    pub top_k: HashSet<Uuid>,
}

/// Search request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    pub artist: Option<String>,
    pub suburb: Option<String>,
    pub price_band: Option<String>,
    #[serde(default = "default_true")]
    pub use_oracle: bool,
}

fn default_true() -> bool {
    true
}

/// A ranked artwork as shown in the gallery
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub artwork: ArtworkRecord,
    pub recommended: bool,
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub explanation: Option<String>,
    pub advisory: Option<String>,
    pub results: Vec<SearchHit>,
    pub total: usize,
}

impl SearchResponse {
    pub fn from_ranked(query: String, ranked: RankedResult) -> Self {
        let RankedResult {
            explanation,
            advisory,
            artworks,
            top_k,
        } = ranked;
        let results: Vec<SearchHit> = artworks
            .into_iter()
            .map(|artwork| SearchHit {
                recommended: top_k.contains(&artwork.id),
                artwork,
            })
            .collect();
        Self {
            query,
            explanation,
            advisory,
            total: results.len(),
            results,
        }
    }
}

/// Filter choices for the gallery sidebar
#[derive(Debug, Clone, Serialize)]
pub struct Facets {
    pub artists: Vec<String>,
    pub suburbs: Vec<String>,
    pub price_bands: Vec<String>,
}

/// Image analysis request; the image arrives already base64-encoded
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub image_base64: String,
    #[serde(default = "default_mime")]
    pub mime: String,
}

fn default_mime() -> String {
    "image/png".to_string()
}

/// Structured reading of an artwork image
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ArtworkAnalysis {
    pub theme: Option<String>,
    pub palette: Option<String>,
    pub emotion: Option<String>,
    pub raw: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReloadResponse {
    pub artworks: usize,
}
