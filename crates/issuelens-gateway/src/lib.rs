//! HTTP gateway for the scan and analyze pipelines.
//!
//! Two POST endpoints, each a linear pipeline: `/scan` pulls open issues from
//! GitHub into the cache, `/analyze` reads the cache and runs the chunked LLM
//! analysis. Every failure maps onto the validation / upstream / unexpected
//! taxonomy; nothing is retried and nothing is swallowed.

mod config;
mod state;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use issuelens_core::now_utc_iso;
use issuelens_github::{GithubIssuesClient, RepoRef};
use issuelens_store::IssueRecord;
use tokio::net::TcpListener;

pub use config::GatewayConfig;
pub use state::GatewayState;
pub use types::{AnalyzeRequest, AnalyzeResponse, ApiError, ScanRequest, ScanResponse};

pub const SCAN_ENDPOINT: &str = "/scan";
pub const ANALYZE_ENDPOINT: &str = "/analyze";

/// Builds the two-route gateway router over shared state.
pub fn build_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route(SCAN_ENDPOINT, post(handle_scan))
        .route(ANALYZE_ENDPOINT, post(handle_analyze))
        .with_state(state)
}

/// Serves the gateway until ctrl-c.
pub async fn run_server(addr: SocketAddr, config: GatewayConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind gateway listener on {addr}"))?;
    tracing::info!(%addr, "gateway listening");

    let state = Arc::new(GatewayState::new(config));
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("gateway server exited unexpectedly")
}

async fn handle_scan(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    let request = match parse_body::<ScanRequest>(&body) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let repo = request.repo.trim();
    if repo.is_empty() {
        return ApiError::bad_request("missing_repo", "Missing required field: repo")
            .into_response();
    }

    // Identifier validation precedes every network call, secret retrieval
    // included.
    let repo_ref = match RepoRef::parse(repo) {
        Ok(repo_ref) => repo_ref,
        Err(error) => {
            return ApiError::bad_request("invalid_repo", error.to_string()).into_response();
        }
    };

    tracing::info!(repo, "starting scan");
    match run_scan(&state, &repo_ref).await {
        Ok(response) => {
            tracing::info!(repo, fetched = response.issues_fetched, "scan complete");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => {
            tracing::error!(repo, code = error.code, "scan failed: {}", error.message);
            error.into_response()
        }
    }
}

async fn run_scan(state: &GatewayState, repo_ref: &RepoRef) -> Result<ScanResponse, ApiError> {
    let secrets = state.secrets().await?;
    let token = secrets
        .fetch(&state.config.github_secret_name)
        .await
        .map_err(|e| ApiError::internal(format!("failed to retrieve GitHub token: {e}")))?
        .field(&["github_token"])
        .map_err(|e| ApiError::internal(format!("failed to retrieve GitHub token: {e}")))?;

    let client = GithubIssuesClient::new(&state.config.github_api_base, &token)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let issues = client.list_open_issues(repo_ref).await.map_err(|e| {
        if e.is_upstream() {
            ApiError::upstream(
                "github_failure",
                format!("Failed to fetch issues from GitHub: {e}"),
            )
        } else {
            ApiError::internal(e.to_string())
        }
    })?;

    let repo = repo_ref.as_repo_string();
    let cached_at = now_utc_iso();
    let records: Vec<IssueRecord> = issues
        .iter()
        .map(|issue| IssueRecord::from_github(&repo, issue, &cached_at))
        .collect();

    let store = state.store().await?;
    let cached_count = store
        .put_issues(&records)
        .map_err(|e| ApiError::internal(format!("failed to cache issues: {e}")))?;

    Ok(ScanResponse {
        repo,
        issues_fetched: issues.len(),
        cached_successfully: true,
        cached_count,
        timestamp: now_utc_iso(),
    })
}

async fn handle_analyze(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    let request = match parse_body::<AnalyzeRequest>(&body) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let repo = request.repo.trim().to_string();
    let prompt = request.prompt.trim().to_string();
    if repo.is_empty() || prompt.is_empty() {
        return ApiError::bad_request(
            "missing_fields",
            "Missing required fields: repo and prompt",
        )
        .into_response();
    }

    tracing::info!(repo, "starting analysis");
    match run_analyze(&state, &repo, &prompt).await {
        Ok(response) => {
            tracing::info!(repo, "analysis complete");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => {
            tracing::error!(repo, code = error.code, "analysis failed: {}", error.message);
            error.into_response()
        }
    }
}

async fn run_analyze(
    state: &GatewayState,
    repo: &str,
    prompt: &str,
) -> Result<AnalyzeResponse, ApiError> {
    let secrets = state.secrets().await?;
    let api_key = secrets
        .fetch(&state.config.llm_secret_name)
        .await
        .map_err(|e| ApiError::internal(format!("failed to retrieve LLM API key: {e}")))?
        .field(&["api_key", "llm_api_key"])
        .map_err(|e| ApiError::internal(format!("failed to retrieve LLM API key: {e}")))?;

    let store = state.store().await?;
    let issues = store
        .list_issues(repo)
        .map_err(|e| ApiError::internal(format!("failed to read cached issues: {e}")))?;

    if issues.is_empty() {
        // Guidance, not an error: the caller has simply not scanned yet.
        return Ok(AnalyzeResponse {
            repo: repo.to_string(),
            analysis: format!(
                "No cached issues found for repository '{repo}'. Please run /scan endpoint first."
            ),
            timestamp: now_utc_iso(),
        });
    }

    let client = state.llm_client(api_key).await?;
    let analysis = issuelens_analysis::analyze_issues(
        client.as_ref(),
        &state.config.llm_model,
        &issues,
        prompt,
        state.config.max_context_tokens,
    )
    .await
    .map_err(|e| {
        if e.is_upstream() {
            ApiError::upstream("llm_failure", format!("Failed to call LLM API: {e}"))
        } else {
            ApiError::internal(e.to_string())
        }
    })?;

    Ok(AnalyzeResponse {
        repo: repo.to_string(),
        analysis,
        timestamp: now_utc_iso(),
    })
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        ApiError::bad_request(
            "malformed_json",
            format!("failed to parse request body: {e}"),
        )
    })
}
