//! REST API server for card validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! card-validator-server
//!
//! # With custom port and readable logs
//! HTTP_PORT=3000 card-validator-server --log-format pretty
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:8080/swagger-ui/ for interactive API documentation.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use card_validator::config::{LogFormat, ServerConfig};
use card_validator::{http, ValidationService};

fn init_tracing(config: &ServerConfig) {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();
    init_tracing(&config);

    let app = http::router(ValidationService::new());

    let addr = config.addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "failed to start server");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
