use std::path::PathBuf;

/// Gateway configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// SQLite file backing the issue cache.
    pub db_path: PathBuf,
    /// Base URL of the secret service.
    pub secrets_base_url: String,
    /// Secret names for the GitHub token and the LLM API key.
    pub github_secret_name: String,
    pub llm_secret_name: String,
    /// Backend selector, validated when the LLM client is first built.
    pub llm_provider: String,
    pub llm_model: String,
    /// Token budget driving the per-chunk issue limit.
    pub max_context_tokens: u32,
    pub github_api_base: String,
    /// Endpoint overrides, used by tests to point at local mock servers.
    pub openai_api_base: Option<String>,
    pub anthropic_api_base: Option<String>,
}

const DEFAULT_DB_PATH: &str = "issuelens.db";
const DEFAULT_SECRETS_BASE_URL: &str = "http://127.0.0.1:8200";
const DEFAULT_GITHUB_SECRET_NAME: &str = "github-token";
const DEFAULT_LLM_SECRET_NAME: &str = "llm-api-key";
const DEFAULT_LLM_PROVIDER: &str = "openai";
const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_CONTEXT_TOKENS: u32 = 4000;
const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            db_path: PathBuf::from(env_or("ISSUELENS_DB_PATH", DEFAULT_DB_PATH)),
            secrets_base_url: env_or("ISSUELENS_SECRETS_URL", DEFAULT_SECRETS_BASE_URL),
            github_secret_name: env_or(
                "ISSUELENS_GITHUB_SECRET_NAME",
                DEFAULT_GITHUB_SECRET_NAME,
            ),
            llm_secret_name: env_or("ISSUELENS_LLM_SECRET_NAME", DEFAULT_LLM_SECRET_NAME),
            llm_provider: env_or("ISSUELENS_LLM_PROVIDER", DEFAULT_LLM_PROVIDER),
            llm_model: env_or("ISSUELENS_LLM_MODEL", DEFAULT_LLM_MODEL),
            max_context_tokens: std::env::var("ISSUELENS_MAX_CONTEXT_TOKENS")
                .ok()
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTEXT_TOKENS),
            github_api_base: env_or("ISSUELENS_GITHUB_API_BASE", DEFAULT_GITHUB_API_BASE),
            openai_api_base: env_opt("ISSUELENS_OPENAI_API_BASE"),
            anthropic_api_base: env_opt("ISSUELENS_ANTHROPIC_API_BASE"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
