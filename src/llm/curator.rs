use std::time::Duration;

use crate::config::LlmConfig;
use crate::llm::oracle::Oracle;
use crate::llm::parse::parse_ranked_titles;
use crate::llm::prompt::PromptTemplate;
use crate::models::ArtworkRecord;

/// What one curator call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleResponse {
    /// The reply text and the titles parsed out of it (possibly none)
    Success {
        explanation: String,
        hints: Vec<String>,
    },
    /// The oracle could not be used; `reason` is fit to show the buyer
    Failure { reason: String },
}

/// Ask the oracle to rank the catalogue for a buyer's query.
///
/// Makes exactly one call, bounded by `llm.timeout_secs`. Transport, status,
/// body and timeout errors all come back as [`OracleResponse::Failure`];
/// nothing escapes as an `Err`.
pub async fn ask(
    oracle: &dyn Oracle,
    llm: &LlmConfig,
    template: &PromptTemplate,
    query: &str,
    catalogue: &[ArtworkRecord],
) -> OracleResponse {
    let user_prompt = template.render(query, catalogue);
    let timeout = Duration::from_secs(llm.timeout_secs.max(1));

    let text = match tokio::time::timeout(
        timeout,
        oracle.complete(&template.system, &user_prompt, llm.temperature),
    )
    .await
    {
        Ok(Ok(text)) => text.trim().to_string(),
        Ok(Err(e)) => {
            tracing::warn!("Curator call failed: {e:#}");
            return OracleResponse::Failure {
                reason: format!("AI recommendations unavailable: {e}"),
            };
        }
        Err(_) => {
            tracing::warn!("Curator call timed out after {}s", timeout.as_secs());
            return OracleResponse::Failure {
                reason: format!(
                    "AI recommendations timed out after {}s",
                    timeout.as_secs()
                ),
            };
        }
    };

    if text.is_empty() {
        tracing::warn!("Curator returned an empty reply");
        return OracleResponse::Failure {
            reason: "AI recommendations returned an empty reply".to_string(),
        };
    }

    let hints = parse_ranked_titles(&text);
    if hints.is_empty() {
        tracing::info!("Curator reply had no numbered list; ranking lexically");
    } else {
        tracing::info!("Curator suggested {} titles: {:?}", hints.len(), hints);
    }

    OracleResponse::Success {
        explanation: text,
        hints,
    }
}
