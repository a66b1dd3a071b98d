use crate::engine;
use crate::errors::AppError;
use crate::fetcher::IterableClient;
use crate::models::ConsolidationSummary;
use crate::registry::ClientRegistry;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client registry, built once at startup and read-only thereafter.
    pub registry: ClientRegistry,
    /// Client for the Iterable list-export endpoint.
    pub iterable: IterableClient,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "list-rollup-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/consolidate
///
/// Accepts a multipart form with a `client` field (registry id) and a
/// `file` field (the uploaded subscriber CSV), and responds with the
/// consolidation summary.
pub async fn consolidate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ConsolidationSummary>, AppError> {
    let mut client_id: Option<String> = None;
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Precondition(format!("Unreadable form submission: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("client") => {
                let value = field.text().await.map_err(|e| {
                    AppError::Precondition(format!("Unreadable client field: {}", e))
                })?;
                client_id = Some(value);
            }
            Some("file") => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Precondition(format!("Unreadable file upload: {}", e))
                })?;
                upload = Some(bytes.to_vec());
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let client_id = client_id.filter(|c| !c.is_empty()).ok_or_else(|| {
        AppError::Precondition("Please select a client and upload a CSV.".to_string())
    })?;

    let summary = engine::consolidate(
        &state.registry,
        &state.iterable,
        &client_id,
        upload.as_deref(),
    )
    .await?;

    Ok(Json(summary))
}
