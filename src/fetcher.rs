use crate::errors::AppError;
use crate::models::SourceResult;
use crate::registry::ProjectDescriptor;
use reqwest::Client;
use std::time::Duration;

/// Terminal state of one project's list fetch.
///
/// `Skipped` and `Failed` both contribute zero records; they are kept
/// distinct so outages stay visible in logs while response semantics
/// treat them identically. Nothing here is ever thrown past the
/// per-project boundary.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(SourceResult),
    Skipped,
    Failed(String),
}

/// Client for the Iterable list-export endpoint.
///
/// One authenticated GET per project, bounded by a fixed timeout so a
/// hung remote list cannot block the whole consolidation.
#[derive(Clone)]
pub struct IterableClient {
    client: Client,
    base_url: String,
}

impl IterableClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::ExternalApi(format!("Failed to create Iterable client: {}", e))
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches one project's full list export.
    ///
    /// Inert projects (no credentials) are skipped. Non-success
    /// responses and empty bodies are skipped too — the remote
    /// "no users" case is not distinguished from "temporarily
    /// unavailable" at this layer. Transport and decode errors are
    /// contained as `Failed` so sibling fetches always proceed.
    pub async fn fetch_list(&self, project: &ProjectDescriptor) -> FetchOutcome {
        let Some((api_key, list_id)) = project.credentials() else {
            tracing::debug!("Skipping project '{}': no credentials", project.name);
            return FetchOutcome::Skipped;
        };

        let url = match reqwest::Url::parse_with_params(
            &format!("{}/api/lists/getUsers", self.base_url),
            &[("listId", list_id)],
        ) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::Failed(format!("Failed to build URL: {}", e)),
        };

        tracing::info!("Fetching list {} for project '{}'", list_id, project.name);

        let response = match self.client.get(url).header("Api-Key", api_key).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed(format!("Request failed: {}", e)),
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Project '{}' list export returned {}, skipping",
                project.name,
                response.status()
            );
            return FetchOutcome::Skipped;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return FetchOutcome::Failed(format!("Failed to read body: {}", e)),
        };

        if body.trim().is_empty() {
            tracing::debug!("Project '{}' list export is empty, skipping", project.name);
            return FetchOutcome::Skipped;
        }

        FetchOutcome::Fetched(parse_bare_list(&body))
    }
}

/// Parses the export's bare list format: headerless, one email per
/// line. Blank lines are dropped and the result deduplicated within
/// this project.
fn parse_bare_list(body: &str) -> SourceResult {
    SourceResult::from_emails(body.lines().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = IterableClient::new(
            "https://api.iterable.com".to_string(),
            Duration::from_secs(30),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_bare_list_dedupes_and_skips_blanks() {
        let result = parse_bare_list("a@x.com\n\nb@x.com\na@x.com\n");
        assert_eq!(result.emails, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_parse_bare_list_handles_crlf() {
        let result = parse_bare_list("a@x.com\r\nb@x.com\r\n");
        assert_eq!(result.emails, vec!["a@x.com", "b@x.com"]);
    }
}
