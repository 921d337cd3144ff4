use std::str::FromStr;
use std::sync::Arc;

use issuelens_ai::{LlmClient, Provider};
use issuelens_secrets::SecretsClient;
use issuelens_store::IssueStore;
use tokio::sync::OnceCell;

use crate::{ApiError, GatewayConfig};

/// Process-lifetime shared state. The store, the secret client, and the LLM
/// strategy object are initialized on first use and reused across
/// invocations; failures stay invocation-scoped, so there is no teardown.
pub struct GatewayState {
    pub config: GatewayConfig,
    store: OnceCell<IssueStore>,
    secrets: OnceCell<SecretsClient>,
    llm: OnceCell<Arc<dyn LlmClient>>,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            store: OnceCell::new(),
            secrets: OnceCell::new(),
            llm: OnceCell::new(),
        }
    }

    pub async fn store(&self) -> Result<&IssueStore, ApiError> {
        self.store
            .get_or_try_init(|| async { IssueStore::open(&self.config.db_path) })
            .await
            .map_err(|e| ApiError::internal(format!("failed to open issue store: {e}")))
    }

    pub async fn secrets(&self) -> Result<&SecretsClient, ApiError> {
        self.secrets
            .get_or_try_init(|| async { SecretsClient::new(&self.config.secrets_base_url) })
            .await
            .map_err(|e| ApiError::internal(format!("failed to build secrets client: {e}")))
    }

    /// Returns the LLM strategy object, building it once from the configured
    /// provider. An unsupported provider is an unexpected error, not a
    /// validation one.
    pub async fn llm_client(&self, api_key: String) -> Result<Arc<dyn LlmClient>, ApiError> {
        let client = self
            .llm
            .get_or_try_init(|| async {
                let provider = Provider::from_str(&self.config.llm_provider)
                    .map_err(|e| ApiError::internal(e.to_string()))?;
                let api_base = match provider {
                    Provider::OpenAi => self.config.openai_api_base.clone(),
                    Provider::Anthropic => self.config.anthropic_api_base.clone(),
                };
                provider.build_client(api_key, api_base).map_err(|e| {
                    ApiError::internal(format!("failed to build LLM client: {e}"))
                })
            })
            .await?;
        Ok(client.clone())
    }
}
