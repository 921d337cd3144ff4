use issuelens_store::IssueRecord;

/// Fixed per-issue token estimate used to derive the chunk size.
pub const TOKENS_PER_ISSUE: u32 = 200;

/// Partitions `issues` into ordered, contiguous chunks of at most
/// `max_tokens / TOKENS_PER_ISSUE` records each, the last chunk holding the
/// remainder. The limit clamps to 1 when the budget is below the per-issue
/// estimate, so every chunk carries at least one record. Empty input yields
/// no chunks.
pub fn chunk_issues(issues: &[IssueRecord], max_tokens: u32) -> Vec<&[IssueRecord]> {
    if issues.is_empty() {
        return Vec::new();
    }

    let limit = (max_tokens / TOKENS_PER_ISSUE).max(1) as usize;
    issues.chunks(limit).collect()
}

#[cfg(test)]
mod tests {
    use issuelens_store::IssueRecord;

    use super::chunk_issues;

    fn records(count: usize) -> Vec<IssueRecord> {
        (0..count)
            .map(|i| IssueRecord {
                repo: "acme/widgets".to_string(),
                issue_id: i as u64,
                issue_number: i as u64,
                title: format!("Issue {i}"),
                body: String::new(),
                html_url: String::new(),
                created_at: String::new(),
                updated_at: String::new(),
                labels: Vec::new(),
                state: "open".to_string(),
                cached_at: String::new(),
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_issues(&[], 4000).is_empty());
    }

    #[test]
    fn partitions_preserve_order_and_cover_all_records() {
        let issues = records(250);
        let chunks = chunk_issues(&issues, 4000);

        assert_eq!(chunks.len(), 13);
        assert_eq!(chunks.iter().map(|c| c.len()).sum::<usize>(), 250);
        assert!(chunks[..12].iter().all(|c| c.len() == 20));
        assert_eq!(chunks[12].len(), 10);

        let ids: Vec<u64> = chunks
            .iter()
            .flat_map(|chunk| chunk.iter().map(|r| r.issue_id))
            .collect();
        let expected: Vec<u64> = (0..250).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn exact_multiple_has_no_remainder_chunk() {
        let issues = records(40);
        let chunks = chunk_issues(&issues, 4000);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 20));
    }

    #[test]
    fn tiny_budget_clamps_limit_to_one() {
        let issues = records(3);
        let chunks = chunk_issues(&issues, 50);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn chunk_count_matches_ceiling_division() {
        for (n, budget, expected) in [(1, 4000, 1), (20, 4000, 1), (21, 4000, 2), (100, 600, 34)] {
            let issues = records(n);
            let chunks = chunk_issues(&issues, budget);
            assert_eq!(chunks.len(), expected, "n={n} budget={budget}");
        }
    }
}
