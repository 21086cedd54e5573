use std::collections::HashSet;

use crate::config::RankingConfig;
use crate::models::{ArtworkRecord, RankedResult};
use crate::search::{fuzzy, lexical};

/// Per-artwork signals, kept only until the final sort.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArtwork {
    /// Position in the input catalogue
    pub index: usize,
    pub lexical: f32,
    pub fuzzy: f32,
    pub rank_bonus: f32,
    pub final_score: f32,
}

/// Score every artwork against the query and the oracle's hints.
///
/// Hints are resolved to catalogue entries in the order given. A hint that
/// resolves to nothing is discarded completely: it neither adds a rank bonus
/// nor counts towards any artwork's fuzzy term.
pub fn score_artworks(
    query: &str,
    catalogue: &[ArtworkRecord],
    hints: &[String],
    config: &RankingConfig,
) -> Vec<ScoredArtwork> {
    let mut used = HashSet::new();
    let mut accepted: Vec<&str> = Vec::new();
    let mut rank_bonus = vec![0.0f32; catalogue.len()];

    for (pos, hint) in hints.iter().take(config.max_hints).enumerate() {
        if let Some(idx) = fuzzy::resolve(hint, catalogue, &mut used, config.acceptance_threshold)
        {
            accepted.push(hint.as_str());
            rank_bonus[idx] = config.rank_bonuses.get(pos).copied().unwrap_or(0.0);
        }
    }

    let query_tokens = lexical::tokenize(query);

    catalogue
        .iter()
        .enumerate()
        .map(|(index, artwork)| {
            let lexical = lexical::score_tokens(&query_tokens, artwork, config.title_bonus);
            let fuzzy = accepted
                .iter()
                .map(|hint| fuzzy::similarity(&artwork.title, hint))
                .fold(0.0f32, f32::max);
            let bonus = rank_bonus[index];
            let final_score = (config.lexical_weight * lexical
                + config.fuzzy_weight * fuzzy
                + config.rank_bonus_weight * bonus)
                .clamp(0.0, 1.0);

            ScoredArtwork {
                index,
                lexical,
                fuzzy,
                rank_bonus: bonus,
                final_score,
            }
        })
        .collect()
}

/// Order the catalogue by blended score.
///
/// The sort is stable, so equal scores keep catalogue order; with an empty
/// query and no hints the output is the input. The first
/// `config.highlight_count` results are flagged in `top_k`. The explanation
/// is left for the caller to fill in.
pub fn blend(
    query: &str,
    catalogue: &[ArtworkRecord],
    hints: &[String],
    config: &RankingConfig,
) -> RankedResult {
    let mut scored = score_artworks(query, catalogue, hints, config);
    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    let artworks: Vec<ArtworkRecord> = scored
        .iter()
        .map(|s| catalogue[s.index].clone())
        .collect();
    let top_k = artworks
        .iter()
        .take(config.highlight_count)
        .map(|a| a.id)
        .collect();

    RankedResult {
        explanation: None,
        advisory: None,
        artworks,
        top_k,
    }
}
