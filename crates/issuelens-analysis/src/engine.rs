use issuelens_ai::{CompletionRequest, LlmClient, LlmError};
use issuelens_store::IssueRecord;

use crate::{chunk_issues, format_issues};

/// Fixed generation budget per completion call.
pub const COMPLETION_MAX_TOKENS: u32 = 2000;

/// System instruction supplied with every analysis call.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that analyzes GitHub issues and provides insights.";

const COMBINE_INSTRUCTION: &str =
    "Summarize and combine the following analyses into a single coherent response:\n\n";

const ANALYSIS_SEPARATOR: &str = "\n\n---\n\n";

/// Analyzes `issues` against `prompt`: each chunk is formatted and submitted
/// in order, one completion call per chunk. A single chunk's response is
/// returned verbatim; multiple responses are merged by exactly one extra
/// combination call. No retries; the first backend failure aborts the whole
/// analysis.
pub async fn analyze_issues(
    client: &dyn LlmClient,
    model: &str,
    issues: &[IssueRecord],
    prompt: &str,
    max_context_tokens: u32,
) -> Result<String, LlmError> {
    let chunks = chunk_issues(issues, max_context_tokens);
    tracing::info!(
        issues = issues.len(),
        chunks = chunks.len(),
        "starting issue analysis"
    );

    let mut analyses = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        tracing::info!(chunk = index + 1, total = chunks.len(), "analyzing chunk");
        let issues_text = format_issues(chunk);
        let response = client
            .complete(completion_request(model, prompt, &issues_text))
            .await?;
        analyses.push(response);
    }

    if analyses.len() > 1 {
        let combined_prompt = format!(
            "{COMBINE_INSTRUCTION}{}",
            analyses.join(ANALYSIS_SEPARATOR)
        );
        tracing::info!("combining analyses from multiple chunks");
        return client
            .complete(completion_request(model, &combined_prompt, ""))
            .await;
    }

    Ok(analyses.pop().unwrap_or_default())
}

fn completion_request(model: &str, prompt: &str, issues_text: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        system: Some(SYSTEM_PROMPT.to_string()),
        user: format!("{prompt}\n\nHere are the issues to analyze:\n\n{issues_text}"),
        max_tokens: COMPLETION_MAX_TOKENS,
    }
}
