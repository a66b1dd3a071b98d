use crate::errors::AppError;
use crate::fetcher::{FetchOutcome, IterableClient};
use crate::models::{ConsolidationSummary, SourceResult};
use crate::registry::ClientRegistry;
use crate::upload;
use std::collections::HashSet;

/// Runs one consolidation: filter the upload, fetch every project's
/// export, union the sources, and summarize.
///
/// Preconditions (known client with projects, upload present) are
/// checked before any parsing or network activity. An invalid upload
/// aborts the whole operation; remote fetches are best-effort and a
/// failed or skipped project only contributes zero records. The
/// registry is never mutated and no state outlives the call.
pub async fn consolidate(
    registry: &ClientRegistry,
    fetcher: &IterableClient,
    client_id: &str,
    upload_bytes: Option<&[u8]>,
) -> Result<ConsolidationSummary, AppError> {
    let projects = registry.lookup(client_id);
    if projects.is_empty() {
        return Err(AppError::Precondition(
            "Please select a client and upload a CSV.".to_string(),
        ));
    }
    let Some(upload_bytes) = upload_bytes.filter(|b| !b.is_empty()) else {
        return Err(AppError::Precondition(
            "Please select a client and upload a CSV.".to_string(),
        ));
    };

    let uploaded = upload::filter_uploaded_list(upload_bytes)?;
    let uploaded_count = uploaded.count();

    let mut remote_results: Vec<SourceResult> = Vec::new();
    let mut api_count = 0usize;
    for project in projects {
        match fetcher.fetch_list(project).await {
            FetchOutcome::Fetched(result) => {
                tracing::info!(
                    "Project '{}' contributed {} addresses",
                    project.name,
                    result.count()
                );
                api_count += result.count();
                remote_results.push(result);
            }
            FetchOutcome::Skipped => {}
            FetchOutcome::Failed(reason) => {
                tracing::warn!(
                    "Project '{}' fetch failed, continuing without it: {}",
                    project.name,
                    reason
                );
            }
        }
    }

    let total_unique = union_size(&uploaded, &remote_results);

    // Unknown clients were rejected above, so the name is always present.
    let client_name = registry
        .client_name(client_id)
        .ok_or_else(|| AppError::Internal("Client vanished during consolidation".to_string()))?;

    let summary = ConsolidationSummary {
        client_name,
        total_unique,
        uploaded_count,
        api_count,
    };
    tracing::info!(
        "Consolidated '{}': {} unique ({} uploaded, {} from API)",
        summary.client_name,
        summary.total_unique,
        summary.uploaded_count,
        summary.api_count
    );
    Ok(summary)
}

/// Size of the set union across all sources. Source order never
/// affects membership.
pub fn union_size(uploaded: &SourceResult, remote: &[SourceResult]) -> usize {
    let mut unique: HashSet<&str> = uploaded.emails.iter().map(String::as_str).collect();
    for result in remote {
        unique.extend(result.emails.iter().map(String::as_str));
    }
    unique.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(emails: &[&str]) -> SourceResult {
        SourceResult::from_emails(emails.iter().map(|e| e.to_string()))
    }

    #[test]
    fn test_union_counts_overlap_once() {
        let uploaded = source(&["a@x.com", "c@x.com"]);
        let remote = vec![source(&["a@x.com", "d@x.com"])];
        assert_eq!(union_size(&uploaded, &remote), 3);
    }

    #[test]
    fn test_union_of_disjoint_sources_is_sum() {
        let uploaded = source(&["a@x.com"]);
        let remote = vec![source(&["b@x.com"]), source(&["c@x.com"])];
        assert_eq!(union_size(&uploaded, &remote), 3);
    }

    #[test]
    fn test_union_is_order_independent() {
        let uploaded = source(&["a@x.com", "b@x.com"]);
        let forward = vec![source(&["b@x.com"]), source(&["c@x.com"])];
        let reversed = vec![source(&["c@x.com"]), source(&["b@x.com"])];
        assert_eq!(
            union_size(&uploaded, &forward),
            union_size(&uploaded, &reversed)
        );
    }
}
