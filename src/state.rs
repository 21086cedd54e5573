use parking_lot::RwLock;
use std::sync::Arc;

use crate::catalogue::source::load_catalogue;
use crate::catalogue::Catalogue;
use crate::config::Config;
use crate::llm::oracle::{DisabledOracle, LlmOracle, Oracle};
use crate::llm::prompt::PromptTemplate;

/// Shared application state.
///
/// The catalogue is a snapshot behind an `Arc`: a search clones the `Arc`
/// and ranks against it while a reload swaps in a new one.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalogue: Arc<RwLock<Arc<Catalogue>>>,
    pub http_client: reqwest::Client,
    pub oracle: Arc<dyn Oracle>,
    pub template: Arc<PromptTemplate>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalogue = load_catalogue(&config.catalogue_path)?;

        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        let oracle: Arc<dyn Oracle> = if config.llm.is_enabled() {
            Arc::new(LlmOracle::new(http_client.clone(), config.llm.clone()))
        } else {
            tracing::warn!("No LLM configured; searches will rank lexically");
            Arc::new(DisabledOracle)
        };

        Ok(Self::with_oracle(config, catalogue, http_client, oracle))
    }

    /// Assemble state from parts, e.g. with a stub oracle in tests.
    pub fn with_oracle(
        config: Config,
        catalogue: Catalogue,
        http_client: reqwest::Client,
        oracle: Arc<dyn Oracle>,
    ) -> Self {
        Self {
            config,
            catalogue: Arc::new(RwLock::new(Arc::new(catalogue))),
            http_client,
            oracle,
            template: Arc::new(PromptTemplate::default()),
        }
    }

    /// Current catalogue snapshot.
    pub fn snapshot(&self) -> Arc<Catalogue> {
        self.catalogue.read().clone()
    }

    /// Re-read the catalogue file and swap the snapshot in whole.
    pub fn reload_catalogue(&self) -> anyhow::Result<usize> {
        let fresh = load_catalogue(&self.config.catalogue_path)?;
        let count = fresh.len();
        *self.catalogue.write() = Arc::new(fresh);
        tracing::info!("Catalogue reloaded: {count} artworks");
        Ok(count)
    }
}
