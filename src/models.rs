use serde::Serialize;

/// The email collection produced by one source (the upload, or one
/// project fetch) after its own internal deduplication.
///
/// Every entry is non-empty. Comparison is exact string equality: no
/// trimming, no case-folding, so `A@x.com` and `a@x.com` are distinct.
/// That mirrors the observed export behavior and is a documented
/// limitation rather than a policy choice.
#[derive(Debug, Clone, Default)]
pub struct SourceResult {
    pub emails: Vec<String>,
}

impl SourceResult {
    /// Deduplicates in input order, dropping empty values.
    pub fn from_emails(emails: impl IntoIterator<Item = String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let emails = emails
            .into_iter()
            .filter(|e| !e.is_empty())
            .filter(|e| seen.insert(e.clone()))
            .collect();
        Self { emails }
    }

    /// This source's contribution to the summary counts.
    pub fn count(&self) -> usize {
        self.emails.len()
    }
}

/// Response body for a consolidation request.
///
/// `api_count` sums per-project counts before cross-source
/// deduplication; `total_unique` is the size of the final merged set,
/// so `total_unique <= uploaded_count + api_count` always holds.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConsolidationSummary {
    pub client_name: String,
    pub total_unique: usize,
    pub uploaded_count: usize,
    pub api_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_result_dedupes_and_drops_empty() {
        let result = SourceResult::from_emails(
            ["a@x.com", "", "b@x.com", "a@x.com"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(result.emails, vec!["a@x.com", "b@x.com"]);
        assert_eq!(result.count(), 2);
    }

    #[test]
    fn test_source_result_is_case_sensitive() {
        let result = SourceResult::from_emails(
            ["A@x.com", "a@x.com"].into_iter().map(String::from),
        );
        assert_eq!(result.count(), 2);
    }
}
