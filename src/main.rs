// src/main.rs

use dotenvy::dotenv;
use richtext_sanitizer::config::Config;
use richtext_sanitizer::routes;
use richtext_sanitizer::state::AppState;
use richtext_sanitizer::utils::html::{ParserCapability, SanitizeMode, sanitize_with};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Report which path requests will take before serving any
    let warmup = sanitize_with("<p>ok</p>", ParserCapability::detect());
    match warmup.mode {
        SanitizeMode::Full => tracing::info!("Tree sanitizer ready"),
        SanitizeMode::Degraded => {
            tracing::warn!("No tree parser available; responses will be degraded-mode output")
        }
    }

    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState { config };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listening address");

    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
