//! End-to-end scan → analyze flow over a real gateway listener, with the
//! secret store, GitHub, and both LLM backends mocked.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use httpmock::prelude::*;
use issuelens_gateway::{build_router, GatewayConfig, GatewayState};
use issuelens_store::IssueStore;
use serde_json::{json, Value};
use tempfile::tempdir;
use tokio::net::TcpListener;

fn base_config(db_path: PathBuf, secrets_url: &str, github_url: &str) -> GatewayConfig {
    GatewayConfig {
        db_path,
        secrets_base_url: secrets_url.to_string(),
        github_secret_name: "github-token".to_string(),
        llm_secret_name: "llm-api-key".to_string(),
        llm_provider: "openai".to_string(),
        llm_model: "gpt-3.5-turbo".to_string(),
        max_context_tokens: 4000,
        github_api_base: github_url.to_string(),
        openai_api_base: None,
        anthropic_api_base: None,
    }
}

async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let app = build_router(Arc::new(GatewayState::new(config)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve gateway");
    });
    addr
}

async fn mock_secrets(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/secret/github-token");
            then.status(200).json_body(json!({ "github_token": "ghp_test" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/secret/llm-api-key");
            then.status(200).json_body(json!({ "api_key": "sk-test" }));
        })
        .await;
}

fn github_issue_row(id: u64) -> Value {
    json!({
        "id": id,
        "number": id,
        "title": format!("Issue {id}"),
        "body": format!("Body of issue {id}"),
        "html_url": format!("https://github.com/acme/widgets/issues/{id}"),
        "created_at": "2026-08-01T00:00:00Z",
        "updated_at": "2026-08-02T00:00:00Z",
        "labels": [ { "name": "bug" } ],
        "state": "open"
    })
}

#[tokio::test]
async fn scan_then_analyze_combines_multiple_chunks() {
    let secrets = MockServer::start_async().await;
    mock_secrets(&secrets).await;

    let github = MockServer::start_async().await;
    let issue_rows: Vec<Value> = (1..=25).map(github_issue_row).collect();
    github
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/widgets/issues");
            then.status(200).json_body(json!(issue_rows));
        })
        .await;

    let llm = MockServer::start_async().await;
    // Chunk calls carry a rendered issue listing; the combination call has an
    // empty issue text, so the two matchers are disjoint.
    let chunk_calls = llm
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_includes("GitHub Issues:");
            then.status(200).json_body(json!({
                "choices": [ { "message": { "content": "chunk analysis" } } ]
            }));
        })
        .await;
    let combine_call = llm
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_includes("Summarize and combine the following analyses");
            then.status(200).json_body(json!({
                "choices": [ { "message": { "content": "final combined analysis" } } ]
            }));
        })
        .await;

    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("issues.db");
    // 600-token budget caps chunks at 3 issues: 25 issues -> 9 chunks.
    let mut config = base_config(db_path.clone(), &secrets.base_url(), &github.base_url());
    config.max_context_tokens = 600;
    config.openai_api_base = Some(llm.url("/v1"));
    let addr = spawn_gateway(config).await;
    let client = reqwest::Client::new();

    let scan: Value = client
        .post(format!("http://{addr}/scan"))
        .json(&json!({ "repo": "acme/widgets" }))
        .send()
        .await
        .expect("scan request")
        .json()
        .await
        .expect("scan body");
    assert_eq!(scan["issues_fetched"], 25);
    assert_eq!(scan["cached_count"], 25);

    let analyze: Value = client
        .post(format!("http://{addr}/analyze"))
        .json(&json!({ "repo": "acme/widgets", "prompt": "Group these by theme" }))
        .send()
        .await
        .expect("analyze request")
        .json()
        .await
        .expect("analyze body");
    assert_eq!(analyze["repo"], "acme/widgets");
    assert_eq!(analyze["analysis"], "final combined analysis");

    assert_eq!(chunk_calls.hits_async().await, 9);
    assert_eq!(combine_call.hits_async().await, 1);

    let cached = IssueStore::open(&db_path)
        .expect("reopen store")
        .list_issues("acme/widgets")
        .expect("read cache");
    assert_eq!(cached.len(), 25);
}

#[tokio::test]
async fn rescan_overwrites_and_single_chunk_passes_through() {
    let secrets = MockServer::start_async().await;
    mock_secrets(&secrets).await;

    let github = MockServer::start_async().await;
    let first_listing = github
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/widgets/issues");
            then.status(200)
                .json_body(json!([github_issue_row(1), github_issue_row(2)]));
        })
        .await;

    let llm = MockServer::start_async().await;
    let llm_calls = llm
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [ { "message": { "content": "verbatim single-chunk answer" } } ]
            }));
        })
        .await;

    let dir = tempdir().expect("tempdir");
    let mut config = base_config(
        dir.path().join("issues.db"),
        &secrets.base_url(),
        &github.base_url(),
    );
    config.openai_api_base = Some(llm.url("/v1"));
    let addr = spawn_gateway(config).await;
    let client = reqwest::Client::new();

    let first: Value = client
        .post(format!("http://{addr}/scan"))
        .json(&json!({ "repo": "acme/widgets" }))
        .send()
        .await
        .expect("first scan")
        .json()
        .await
        .expect("first scan body");
    assert_eq!(first["cached_count"], 2);

    // Second scan returns a single, retitled issue. Row 1 is overwritten in
    // place; row 2 remains from the earlier scan (nothing is deleted).
    first_listing.delete_async().await;
    github
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/widgets/issues");
            then.status(200).json_body(json!([{
                "id": 1,
                "number": 1,
                "title": "Retitled issue",
                "body": "updated body",
                "html_url": "https://github.com/acme/widgets/issues/1",
                "created_at": "2026-08-01T00:00:00Z",
                "updated_at": "2026-08-05T00:00:00Z",
                "labels": [],
                "state": "open"
            }]));
        })
        .await;

    let second: Value = client
        .post(format!("http://{addr}/scan"))
        .json(&json!({ "repo": "acme/widgets" }))
        .send()
        .await
        .expect("second scan")
        .json()
        .await
        .expect("second scan body");
    assert_eq!(second["issues_fetched"], 1);

    let analyze: Value = client
        .post(format!("http://{addr}/analyze"))
        .json(&json!({ "repo": "acme/widgets", "prompt": "Summarize" }))
        .send()
        .await
        .expect("analyze request")
        .json()
        .await
        .expect("analyze body");
    assert_eq!(analyze["analysis"], "verbatim single-chunk answer");
    assert_eq!(llm_calls.hits_async().await, 1);
}

#[tokio::test]
async fn anthropic_provider_serves_analysis_end_to_end() {
    let secrets = MockServer::start_async().await;
    mock_secrets(&secrets).await;

    let github = MockServer::start_async().await;
    github
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/widgets/issues");
            then.status(200).json_body(json!([github_issue_row(1)]));
        })
        .await;

    let llm = MockServer::start_async().await;
    let messages_call = llm
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "sk-test")
                .header("anthropic-version", "2023-06-01");
            then.status(200).json_body(json!({
                "content": [ { "type": "text", "text": "anthropic analysis" } ]
            }));
        })
        .await;

    let dir = tempdir().expect("tempdir");
    let mut config = base_config(
        dir.path().join("issues.db"),
        &secrets.base_url(),
        &github.base_url(),
    );
    config.llm_provider = "anthropic".to_string();
    config.llm_model = "claude-3-sonnet-20240229".to_string();
    config.anthropic_api_base = Some(llm.url("/v1"));
    let addr = spawn_gateway(config).await;
    let client = reqwest::Client::new();

    client
        .post(format!("http://{addr}/scan"))
        .json(&json!({ "repo": "acme/widgets" }))
        .send()
        .await
        .expect("scan request");

    let analyze: Value = client
        .post(format!("http://{addr}/analyze"))
        .json(&json!({ "repo": "acme/widgets", "prompt": "Summarize" }))
        .send()
        .await
        .expect("analyze request")
        .json()
        .await
        .expect("analyze body");
    assert_eq!(analyze["analysis"], "anthropic analysis");
    messages_call.assert_async().await;
}
