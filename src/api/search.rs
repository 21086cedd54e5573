use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::catalogue::filter::CatalogueFilter;
use crate::models::{SearchRequest, SearchResponse};
use crate::search::pipeline::{rank_artworks, rank_lexically, RankContext};
use crate::state::AppState;

const MAX_QUERY_LEN: usize = 500;

/// POST /api/search - Gallery search:
///   1. Apply sidebar filters to the current catalogue snapshot
///   2. Ask the curator oracle for a ranked shortlist (skipped for empty
///      queries and when `use_oracle` is false)
///   3. Blend lexical relevance with the oracle's suggestions
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = truncate_to_char_boundary(req.query.trim(), MAX_QUERY_LEN);

    let snapshot = state.snapshot();
    let filter = CatalogueFilter::from_selections(
        req.artist.as_deref(),
        req.suburb.as_deref(),
        req.price_band.as_deref(),
    );
    let filtered = filter.apply(snapshot.artworks());
    tracing::info!(
        "Search '{query}': {} of {} artworks after filters",
        filtered.len(),
        snapshot.len()
    );

    let ranked = if req.use_oracle {
        let ctx = RankContext {
            oracle: state.oracle.as_ref(),
            llm: &state.config.llm,
            template: &state.template,
            ranking: &state.config.ranking,
        };
        rank_artworks(&ctx, &query, &filtered).await
    } else {
        rank_lexically(&query, &filtered, &state.config.ranking)
    };

    Ok(Json(SearchResponse::from_ranked(query, ranked)))
}

fn truncate_to_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    s.char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= max_len)
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate_to_char_boundary("beach", 500), "beach");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let s = "ééééé"; // 10 bytes
        let t = truncate_to_char_boundary(s, 3);
        assert_eq!(t, "é");
        assert_eq!(truncate_to_char_boundary(s, 4), "éé");
    }

    #[test]
    fn test_truncate_never_exceeds_limit() {
        let s = "a€b€c€"; // '€' is 3 bytes
        for max in 0..s.len() {
            let t = truncate_to_char_boundary(s, max);
            assert!(t.len() <= max, "{t:?} is longer than {max}");
            assert!(s.starts_with(&t));
        }
    }
}
