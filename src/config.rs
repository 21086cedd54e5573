use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON export of the artwork catalogue
    pub catalogue_path: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// LLM provider configuration
    pub llm: LlmConfig,
    /// Blend weights and matching thresholds
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama", "openai", or "none" to disable the oracle
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for curation prompts
    pub chat_model: String,
    /// Model name for image analysis (must accept image input)
    pub vision_model: String,
    /// API key (only needed for cloud providers)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Sampling temperature for curation prompts
    pub temperature: f32,
    /// Hard limit on a single oracle call, in seconds (capped at 120)
    pub timeout_secs: u64,
}

/// Tunable constants for the rank blend.
///
/// None of these values has a derivation behind it; they are the settings the
/// marketplace shipped with and are expected to be tuned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Weight of the token-overlap score
    pub lexical_weight: f32,
    /// Weight of the best title similarity to any accepted hint
    pub fuzzy_weight: f32,
    /// Weight of the explicit oracle rank bonus
    pub rank_bonus_weight: f32,
    /// Bonus for 1st, 2nd and 3rd oracle hints; later hints get nothing
    pub rank_bonuses: Vec<f32>,
    /// Minimum similarity for a hint to be treated as naming a catalogue title
    pub acceptance_threshold: f32,
    /// Added to the lexical score when a query token hits the title
    pub title_bonus: f32,
    /// Number of leading results flagged for highlighting
    pub highlight_count: usize,
    /// Upper bound on hints taken from one oracle reply
    pub max_hints: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue_path: PathBuf::from("./data/artworks.json"),
            bind_addr: "127.0.0.1:9000".to_string(),
            llm: LlmConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            vision_model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: 0.2,
            timeout_secs: 30,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            lexical_weight: 0.60,
            fuzzy_weight: 0.25,
            rank_bonus_weight: 0.15,
            rank_bonuses: vec![1.0, 0.66, 0.33],
            acceptance_threshold: 0.40,
            title_bonus: 0.25,
            highlight_count: 3,
            max_hints: 10,
        }
    }
}

impl LlmConfig {
    /// Whether an oracle should be consulted at all.
    ///
    /// OpenAI without a key would only ever produce auth failures, so it is
    /// treated the same as an explicit "none".
    pub fn is_enabled(&self) -> bool {
        match self.provider.as_str() {
            "none" | "" => false,
            "openai" => self.api_key.as_deref().is_some_and(|k| !k.is_empty()),
            _ => true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("ART_CURATOR_CATALOGUE") {
            config.catalogue_path = PathBuf::from(path);
        }
        if let Ok(addr) = std::env::var("ART_CURATOR_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(model) = std::env::var("LLM_VISION_MODEL") {
            config.llm.vision_model = model;
        }
        // OPENAI_API_KEY is what the marketplace deployments already export
        if let Ok(key) = std::env::var("LLM_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY")) {
            config.llm.api_key = Some(key);
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(v) = val.parse() {
                config.llm.temperature = v;
            }
        }
        if let Ok(val) = std::env::var("LLM_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.llm.timeout_secs = v.min(120);
            }
        }

        if let Some(v) = env_score("RANKING_LEXICAL_WEIGHT") {
            config.ranking.lexical_weight = v;
        }
        if let Some(v) = env_score("RANKING_FUZZY_WEIGHT") {
            config.ranking.fuzzy_weight = v;
        }
        if let Some(v) = env_score("RANKING_RANK_BONUS_WEIGHT") {
            config.ranking.rank_bonus_weight = v;
        }
        if let Some(v) = env_score("RANKING_ACCEPTANCE_THRESHOLD") {
            config.ranking.acceptance_threshold = v;
        }
        if let Ok(val) = std::env::var("RANKING_HIGHLIGHT_COUNT") {
            if let Ok(v) = val.parse() {
                config.ranking.highlight_count = v;
            }
        }

        config
    }
}

fn env_score(key: &str) -> Option<f32> {
    let val = std::env::var(key).ok()?;
    let parsed = parse_score(&val);
    if parsed.is_none() {
        tracing::warn!("Ignoring {key}={val}: expected a finite, non-negative number");
    }
    parsed
}

/// A blend weight or threshold; `inf`, `NaN` and negatives are rejected.
fn parse_score(val: &str) -> Option<f32> {
    val.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
