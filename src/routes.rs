// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::sanitize,
    models::sanitize::{PolicyResponse, SanitizeRequest, SanitizeResponse, TagRule},
    state::AppState,
    utils::html::SanitizeMode,
};

#[derive(OpenApi)]
#[openapi(
    paths(sanitize::sanitize_content, sanitize::get_policy),
    components(schemas(
        SanitizeRequest,
        SanitizeResponse,
        SanitizeMode,
        PolicyResponse,
        TagRule
    ))
)]
pub struct ApiDoc;

/// Assembles the main application router.
///
/// * Mounts the sanitizer routes under `/api`.
/// * Serves the OpenAPI document and Swagger UI.
/// * Applies global middleware (Trace, CORS, body limit).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/sanitize", post(sanitize::sanitize_content))
        .route("/policy", get(sanitize::get_policy));

    Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(state.config.max_body_bytes)),
        )
        .with_state(state)
}
