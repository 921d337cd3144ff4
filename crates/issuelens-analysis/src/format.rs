use std::fmt::Write as _;

use issuelens_store::IssueRecord;

/// Maximum body characters carried into the rendered text before elision.
pub const BODY_PREVIEW_CHARS: usize = 500;

/// Rendered in place of the issue listing when a chunk is empty.
pub const NO_ISSUES_SENTINEL: &str = "No issues found.";

const TRUNCATION_MARKER: &str = "...";

/// Renders a chunk of records into one text block for LLM consumption.
/// Record order in the output matches chunk order; the field order and the
/// 500-character elision rule are fixed for output compatibility.
pub fn format_issues(issues: &[IssueRecord]) -> String {
    if issues.is_empty() {
        return NO_ISSUES_SENTINEL.to_string();
    }

    let mut formatted = String::from("GitHub Issues:\n\n");
    for issue in issues {
        let _ = writeln!(formatted, "Issue #{}:", issue.issue_number);
        let _ = writeln!(formatted, "Title: {}", issue.title);
        let _ = writeln!(formatted, "Created: {}", issue.created_at);
        let _ = writeln!(formatted, "URL: {}", issue.html_url);

        if !issue.body.is_empty() {
            let _ = writeln!(formatted, "Description: {}", truncate_body(&issue.body));
        }

        if !issue.labels.is_empty() {
            let _ = writeln!(formatted, "Labels: {}", issue.labels.join(", "));
        }

        formatted.push('\n');
    }

    formatted
}

fn truncate_body(body: &str) -> String {
    let mut chars = body.char_indices();
    match chars.nth(BODY_PREVIEW_CHARS) {
        Some((byte_offset, _)) => format!("{}{TRUNCATION_MARKER}", &body[..byte_offset]),
        None => body.to_string(),
    }
}
