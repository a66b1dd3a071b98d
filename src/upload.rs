use crate::errors::AppError;
use crate::models::SourceResult;

/// Columns the uploaded snapshot must carry. Anything else is ignored.
const REQUIRED_COLUMNS: [&str; 3] = ["email", "unsubscribed", "active_subscriber"];

/// Filters an uploaded subscriber snapshot down to its active addresses.
///
/// A row survives iff `unsubscribed == "no"` and
/// `active_subscriber == "yes"` — exact string match, so case variants
/// and missing values exclude the row. Empty emails are dropped and
/// the survivors deduplicated by exact string equality.
///
/// Deterministic for identical input bytes; performs no I/O. An empty
/// but well-formed file yields a zero-count result, which is not an
/// error. Structural failures (bad CSV, missing required columns)
/// surface as `AppError::Validation`.
pub fn filter_uploaded_list(bytes: &[u8]) -> Result<SourceResult, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(false)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| AppError::Validation(format!("Unreadable CSV header: {}", e)))?
        .clone();

    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    let mut missing = Vec::new();
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h == column) {
            Some(idx) => *slot = idx,
            None => missing.push(column),
        }
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )));
    }
    let [email_idx, unsubscribed_idx, active_idx] = indices;

    let mut retained = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::Validation(format!("Malformed CSV row: {}", e)))?;
        let unsubscribed = record.get(unsubscribed_idx).unwrap_or("");
        let active = record.get(active_idx).unwrap_or("");
        if unsubscribed != "no" || active != "yes" {
            continue;
        }
        let email = record.get(email_idx).unwrap_or("");
        if email.is_empty() {
            continue;
        }
        retained.push(email.to_string());
    }

    let result = SourceResult::from_emails(retained);
    tracing::debug!("Uploaded snapshot yielded {} active subscribers", result.count());
    Ok(result)
}
