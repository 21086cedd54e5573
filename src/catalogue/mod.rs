//! In-memory artwork catalogue.
//!
//! A [`Catalogue`] is an immutable snapshot. Reloading builds a new snapshot
//! and swaps it in whole; nothing mutates records in place.

pub mod filter;
pub mod source;

use chrono::{DateTime, Utc};

use crate::models::ArtworkRecord;

#[derive(Debug, Clone)]
pub struct Catalogue {
    artworks: Vec<ArtworkRecord>,
    loaded_at: DateTime<Utc>,
}

impl Catalogue {
    pub fn new(artworks: Vec<ArtworkRecord>) -> Self {
        Self {
            artworks,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn artworks(&self) -> &[ArtworkRecord] {
        &self.artworks
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalogue() {
        let cat = Catalogue::empty();
        assert!(cat.is_empty());
        assert_eq!(cat.len(), 0);
        assert!(cat.artworks().is_empty());
    }

    #[test]
    fn test_duplicate_titles_kept_in_order() {
        let first = ArtworkRecord::new("Beach View", "Artist 1");
        let second = ArtworkRecord::new("Beach View", "Artist 9");
        let cat = Catalogue::new(vec![first.clone(), second.clone()]);
        assert_eq!(cat.artworks(), &[first, second]);
    }
}
