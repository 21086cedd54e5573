use std::collections::HashSet;

use crate::models::ArtworkRecord;

/// Lower-case and split on anything that is not alphanumeric.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every searchable field of a record as one token set.
fn field_tokens(artwork: &ArtworkRecord) -> HashSet<String> {
    let mut hay = String::new();
    for field in [
        artwork.title.as_str(),
        artwork.artist.as_str(),
        artwork.style.as_str(),
        artwork.medium.as_str(),
        artwork.suburb.as_str(),
        artwork.price_range.as_str(),
    ] {
        hay.push_str(field);
        hay.push(' ');
    }
    for tag in &artwork.tags {
        hay.push_str(tag);
        hay.push(' ');
    }
    tokenize(&hay)
}

/// Token-overlap relevance of one artwork to a query, in `[0, 1]`.
///
/// The fraction of query tokens found anywhere in the record, plus
/// `title_bonus` if any query token is a title token.
pub fn score(query: &str, artwork: &ArtworkRecord, title_bonus: f32) -> f32 {
    let query_tokens = tokenize(query);
    score_tokens(&query_tokens, artwork, title_bonus)
}

/// [`score`] with the query already tokenized, for scoring a whole catalogue.
pub fn score_tokens(query_tokens: &HashSet<String>, artwork: &ArtworkRecord, title_bonus: f32) -> f32 {
    if query_tokens.is_empty() {
        return 0.0;
    }

    let fields = field_tokens(artwork);
    let overlap = query_tokens.intersection(&fields).count();
    let mut base = overlap as f32 / query_tokens.len().max(1) as f32;

    let title = tokenize(&artwork.title);
    if query_tokens.iter().any(|t| title.contains(t)) {
        base += title_bonus;
    }

    base.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BONUS: f32 = 0.25;

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokens = tokenize("Calm, ocean-scene!! (Blue)");
        let expected: HashSet<String> = ["calm", "ocean", "scene", "blue"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let art = ArtworkRecord::new("Beach View", "Artist 1");
        assert_eq!(score("", &art, BONUS), 0.0);
        assert_eq!(score("  ?! ", &art, BONUS), 0.0);
    }

    #[test]
    fn test_title_hit_gets_bonus() {
        let art = ArtworkRecord::new("Beach View", "Artist 1");
        // 1/1 overlap + bonus, clamped
        assert_eq!(score("beach", &art, BONUS), 1.0);
        // 1/2 overlap + bonus
        assert!((score("beach sunset", &art, BONUS) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_tag_hit_without_title_bonus() {
        let art = ArtworkRecord::new("Dramatic Clouds", "Artist 2").with_tags(["sky", "storm"]);
        assert!((score("storm ocean", &art, BONUS) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_suburb_and_price_range_are_searchable() {
        let mut art = ArtworkRecord::new("Untitled", "Someone").with_suburb("Bondi");
        art.price_range = "Budget".to_string();
        assert!((score("bondi budget", &art, BONUS) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let art = ArtworkRecord::new("Monalisa", "Artist 4");
        assert_eq!(score("abstract ocean", &art, BONUS), 0.0);
    }

    #[test]
    fn test_missing_fields_are_not_errors() {
        let art = ArtworkRecord::new("", "");
        assert_eq!(score("anything", &art, BONUS), 0.0);
    }

    #[test]
    fn test_score_within_unit_interval() {
        let art = ArtworkRecord::new("Blue Blue Sea", "Blue").with_tags(["blue"]);
        let s = score("blue sea", &art, 5.0);
        assert!((0.0..=1.0).contains(&s));
    }
}
