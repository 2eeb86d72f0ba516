use axum::{Json, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::sanitize::{PolicyResponse, SanitizeRequest, SanitizeResponse},
    utils::html::{ParserCapability, SanitizeMode, sanitize_with},
};

/// Sanitize editor HTML for rendering.
///
/// Runs on the blocking pool: the work is CPU-bound and scales with input size.
/// A `degraded` mode in the response means only scripts were stripped.
#[utoipa::path(
    post,
    path = "/api/sanitize",
    request_body = SanitizeRequest,
    responses(
        (status = 200, description = "Sanitized HTML", body = SanitizeResponse),
        (status = 400, description = "Input failed validation")
    )
)]
pub async fn sanitize_content(
    Json(payload): Json<SanitizeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let input_len = payload.html.len();
    let sanitized = tokio::task::spawn_blocking(move || {
        sanitize_with(&payload.html, ParserCapability::detect())
    })
    .await?;

    if sanitized.mode == SanitizeMode::Degraded {
        tracing::warn!("Returned degraded-mode output for {} bytes of input", input_len);
    }

    Ok(Json(SanitizeResponse::from(sanitized)))
}

/// List the tags and attributes the sanitizer keeps.
#[utoipa::path(
    get,
    path = "/api/policy",
    responses((status = 200, description = "Sanitizer allow-list", body = PolicyResponse))
)]
pub async fn get_policy() -> impl IntoResponse {
    Json(PolicyResponse::current())
}
