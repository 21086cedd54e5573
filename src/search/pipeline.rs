use std::collections::HashSet;

use crate::config::{LlmConfig, RankingConfig};
use crate::llm::curator::{ask, OracleResponse};
use crate::llm::oracle::Oracle;
use crate::llm::prompt::PromptTemplate;
use crate::models::{ArtworkRecord, RankedResult};
use crate::search::blend::blend;

/// Everything one ranking pass needs besides the query and the artworks.
pub struct RankContext<'a> {
    pub oracle: &'a dyn Oracle,
    pub llm: &'a LlmConfig,
    pub template: &'a PromptTemplate,
    pub ranking: &'a RankingConfig,
}

/// Rank an already-filtered catalogue for a buyer's query.
///
/// An empty query returns the catalogue untouched without calling the
/// oracle. Otherwise the oracle is consulted once; if it fails the order is
/// purely lexical and the failure reason is passed on as an advisory.
pub async fn rank_artworks(
    ctx: &RankContext<'_>,
    query: &str,
    catalogue: &[ArtworkRecord],
) -> RankedResult {
    let query = query.trim();
    if query.is_empty() || catalogue.is_empty() {
        return RankedResult {
            explanation: None,
            advisory: None,
            artworks: catalogue.to_vec(),
            top_k: HashSet::new(),
        };
    }

    match ask(ctx.oracle, ctx.llm, ctx.template, query, catalogue).await {
        OracleResponse::Success { explanation, hints } => {
            let mut result = blend(query, catalogue, &hints, ctx.ranking);
            result.explanation = Some(explanation);
            result
        }
        OracleResponse::Failure { reason } => {
            let mut result = blend(query, catalogue, &[], ctx.ranking);
            result.advisory = Some(reason);
            result
        }
    }
}

/// Rank without consulting any oracle.
pub fn rank_lexically(
    query: &str,
    catalogue: &[ArtworkRecord],
    ranking: &RankingConfig,
) -> RankedResult {
    let query = query.trim();
    if query.is_empty() {
        return RankedResult {
            artworks: catalogue.to_vec(),
            ..RankedResult::default()
        };
    }
    blend(query, catalogue, &[], ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl Counting {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Oracle for Counting {
        async fn complete(&self, _s: &str, _u: &str, _t: f32) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(r) => Ok(r.to_string()),
                None => anyhow::bail!("connection refused"),
            }
        }
    }

    fn gallery() -> Vec<ArtworkRecord> {
        vec![
            ArtworkRecord::new("Beach View", "Artist 1"),
            ArtworkRecord::new("Mountain Flowers", "Artist 3"),
            ArtworkRecord::new("Monalisa", "Artist 4"),
        ]
    }

    async fn run(oracle: &Counting, query: &str, cat: &[ArtworkRecord]) -> RankedResult {
        let llm = LlmConfig::default();
        let template = PromptTemplate::default();
        let ranking = RankingConfig::default();
        let ctx = RankContext {
            oracle,
            llm: &llm,
            template: &template,
            ranking: &ranking,
        };
        rank_artworks(&ctx, query, cat).await
    }

    #[tokio::test]
    async fn test_empty_query_skips_oracle() {
        let oracle = Counting::replying("1. Monalisa - nice");
        let cat = gallery();
        let result = run(&oracle, "   ", &cat).await;
        assert_eq!(result.artworks, cat);
        assert!(result.explanation.is_none());
        assert!(result.top_k.is_empty());
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_catalogue_skips_oracle() {
        let oracle = Counting::replying("1. Monalisa - nice");
        let result = run(&oracle, "beach", &[]).await;
        assert!(result.artworks.is_empty());
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_lexical() {
        let oracle = Counting::failing();
        let cat = gallery();
        let result = run(&oracle, "flowers", &cat).await;

        let lexical = rank_lexically("flowers", &cat, &RankingConfig::default());
        assert_eq!(result.artworks, lexical.artworks);
        assert!(result.explanation.is_none());
        assert!(result.advisory.unwrap().contains("connection refused"));
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_carries_explanation() {
        let oracle = Counting::replying("1. Monalisa – a classic portrait");
        let cat = gallery();
        let result = run(&oracle, "portrait", &cat).await;
        assert_eq!(result.artworks[0].title, "Monalisa");
        assert_eq!(
            result.explanation.as_deref(),
            Some("1. Monalisa – a classic portrait")
        );
        assert!(result.advisory.is_none());
        assert!(result.top_k.contains(&result.artworks[0].id));
    }

    #[test]
    fn test_rank_lexically_empty_query_identity() {
        let cat = gallery();
        let result = rank_lexically("", &cat, &RankingConfig::default());
        assert_eq!(result.artworks, cat);
        assert!(result.top_k.is_empty());
    }
}
