//! Sidebar filters applied before ranking.

use std::collections::BTreeSet;

use crate::models::{ArtworkRecord, Facets};

/// Fixed price bands offered in the sidebar, inclusive on both ends.
pub const PRICE_BANDS: [(&str, f64, f64); 5] = [
    ("100 - 500", 100.0, 500.0),
    ("500 - 1000", 500.0, 1000.0),
    ("1000 - 2000", 1000.0, 2000.0),
    ("2000 - 5000", 2000.0, 5000.0),
    ("5000 - 10000", 5000.0, 10000.0),
];

const ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub low: f64,
    pub high: f64,
}

impl PriceBand {
    /// Look up a band by its label. Whitespace around the dash is ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        PRICE_BANDS.iter().find_map(|(name, low, high)| {
            let name: String = name.chars().filter(|c| !c.is_whitespace()).collect();
            (name == wanted).then_some(Self {
                low: *low,
                high: *high,
            })
        })
    }

    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogueFilter {
    pub artist: Option<String>,
    pub suburb: Option<String>,
    pub price_band: Option<PriceBand>,
}

impl CatalogueFilter {
    /// Build from raw sidebar selections; `"All"` and blanks mean unconstrained.
    /// An unknown band label is ignored rather than filtering everything out.
    pub fn from_selections(
        artist: Option<&str>,
        suburb: Option<&str>,
        price_band: Option<&str>,
    ) -> Self {
        let band = selection(price_band).and_then(|label| {
            let band = PriceBand::from_label(&label);
            if band.is_none() {
                tracing::warn!("Ignoring unknown price band '{label}'");
            }
            band
        });
        Self {
            artist: selection(artist),
            suburb: selection(suburb),
            price_band: band,
        }
    }

    pub fn matches(&self, artwork: &ArtworkRecord) -> bool {
        if let Some(artist) = &self.artist {
            if &artwork.artist != artist {
                return false;
            }
        }
        if let Some(suburb) = &self.suburb {
            if &artwork.suburb != suburb {
                return false;
            }
        }
        if let Some(band) = &self.price_band {
            match artwork.price {
                Some(p) if band.contains(p) => {}
                _ => return false,
            }
        }
        true
    }

    /// Matching artworks in catalogue order.
    pub fn apply(&self, artworks: &[ArtworkRecord]) -> Vec<ArtworkRecord> {
        artworks.iter().filter(|a| self.matches(a)).cloned().collect()
    }
}

fn selection(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(str::to_string)
}

/// Distinct artists and suburbs for the sidebar, sorted.
pub fn facets(artworks: &[ArtworkRecord]) -> Facets {
    let artists: BTreeSet<&str> = artworks
        .iter()
        .map(|a| a.artist.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    let suburbs: BTreeSet<&str> = artworks
        .iter()
        .map(|a| a.suburb.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    Facets {
        artists: artists.into_iter().map(str::to_string).collect(),
        suburbs: suburbs.into_iter().map(str::to_string).collect(),
        price_bands: PRICE_BANDS.iter().map(|(l, _, _)| l.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ArtworkRecord> {
        vec![
            ArtworkRecord::new("Beach View", "Artist 1")
                .with_suburb("Bondi")
                .with_price(450.0),
            ArtworkRecord::new("Dramatic Clouds", "Artist 2")
                .with_suburb("Coogee")
                .with_price(1500.0),
            ArtworkRecord::new("Monalisa", "Artist 1").with_suburb("Bondi"),
        ]
    }

    #[test]
    fn test_all_means_unconstrained() {
        let f = CatalogueFilter::from_selections(Some("All"), Some(""), None);
        assert_eq!(f.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_artist_and_suburb_filters() {
        let f = CatalogueFilter::from_selections(Some("Artist 1"), Some("Bondi"), None);
        let titles: Vec<_> = f.apply(&sample()).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Beach View", "Monalisa"]);
    }

    #[test]
    fn test_price_band_excludes_unpriced() {
        let f = CatalogueFilter::from_selections(None, None, Some("100-500"));
        let titles: Vec<_> = f.apply(&sample()).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Beach View"]);
    }

    #[test]
    fn test_price_band_bounds_inclusive() {
        let band = PriceBand::from_label("500 - 1000").unwrap();
        assert!(band.contains(500.0));
        assert!(band.contains(1000.0));
        assert!(!band.contains(1000.01));
    }

    #[test]
    fn test_unknown_band_ignored() {
        let f = CatalogueFilter::from_selections(None, None, Some("1 - 2"));
        assert!(f.price_band.is_none());
        assert_eq!(f.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_facets_sorted_and_deduplicated() {
        let mut artworks = sample();
        artworks.push(ArtworkRecord::new("Untitled", ""));
        let f = facets(&artworks);
        assert_eq!(f.artists, vec!["Artist 1", "Artist 2"]);
        assert_eq!(f.suburbs, vec!["Bondi", "Coogee"]);
        assert_eq!(f.price_bands.len(), PRICE_BANDS.len());
    }
}
