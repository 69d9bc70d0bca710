// LogQuery - core/query.rs
//
// Top-level query over one raw text snapshot: assemble, then filter and rank.
// Stateless: every call re-parses the snapshot it is given.

use crate::core::filter::{apply_criteria, QueryCriteria};
use crate::core::model::LogEntry;
use crate::core::parser::parse_content;

/// Run a query over the full current text of a log source.
///
/// `raw_text` is `None` when the source is disabled or does not exist; that
/// is a normal outcome and yields an empty result.
pub fn query_text(raw_text: Option<&str>, criteria: &QueryCriteria) -> Vec<LogEntry> {
    let Some(text) = raw_text else {
        tracing::debug!("No log source text available; returning empty result");
        return Vec::new();
    };

    let parsed = parse_content(text);
    apply_criteria(parsed.entries, criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
2023-10-01 12:00:00,123456 [foo.bar] INFO (mod.py:10) hello
Traceback (most recent call last):
  File \"mod.py\", line 10, in <module>
2023-10-01 23:59:59,999999 [foo.bar] ERROR (mod.py:20) an error occurred
2023-10-02 00:00:00,000000 [foo.baz] DEBUG (other.py:3) midnight
";

    #[test]
    fn test_absent_source_is_empty() {
        assert!(query_text(None, &QueryCriteria::default()).is_empty());
    }

    #[test]
    fn test_empty_source_is_empty() {
        assert!(query_text(Some(""), &QueryCriteria::default()).is_empty());
    }

    #[test]
    fn test_query_assembles_then_ranks() {
        let result = query_text(Some(LOG), &QueryCriteria::default());
        let levels: Vec<&str> = result.iter().map(|e| e.level.as_str()).collect();
        assert_eq!(levels, vec!["DEBUG", "ERROR", "INFO"]);
        assert_eq!(
            result[2].content,
            "hello\nTraceback (most recent call last):\n  File \"mod.py\", line 10, in <module>"
        );
    }

    #[test]
    fn test_since_date_boundary() {
        let criteria = QueryCriteria::default().with_since("2023-10-02".parse().unwrap());
        let result = query_text(Some(LOG), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].content, "midnight");
    }

    #[test]
    fn test_search_matches_folded_traceback() {
        let criteria = QueryCriteria::default().with_search("most RECENT");
        let result = query_text(Some(LOG), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].line, 10);
    }
}
