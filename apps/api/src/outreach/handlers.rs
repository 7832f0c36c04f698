//! Axum route handlers for the Outreach API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use url::Url;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::OutreachResult;
use crate::outreach::pipeline::generate_outreach;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub results: Vec<OutreachResult>,
}

/// POST /generate
///
/// Turns a careers page into one outreach email per job posting found on it.
/// The URL is validated before any fetch or completion call is made.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let url = parse_target_url(&request.url)?;

    let span = info_span!("generate", request_id = %Uuid::new_v4(), url = %url);
    let results = async {
        info!("Generating outreach");
        generate_outreach(&state, &url).await
    }
    .instrument(span)
    .await?;

    Ok(Json(GenerateResponse { results }))
}

fn parse_target_url(raw: &str) -> Result<Url, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }
    Url::parse(raw).map_err(|e| AppError::Validation(format!("'{raw}' is not a valid URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_url_accepts_absolute_url() {
        let url = parse_target_url("  https://jobs.acme.example/careers?team=eng ").unwrap();
        assert_eq!(url.host_str(), Some("jobs.acme.example"));
    }

    #[test]
    fn test_parse_target_url_rejects_relative_url() {
        let err = parse_target_url("/careers").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("/careers")));
    }

    #[test]
    fn test_parse_target_url_rejects_empty() {
        assert!(matches!(parse_target_url("   "), Err(AppError::Validation(_))));
    }
}
