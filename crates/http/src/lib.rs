//! HTTP server facade with Axum, error handling, and OpenAPI support.

use std::future::Future;

use anyhow::Context;
use axum::{extract::State, routing::get, Router};

use bookclub_kernel::{settings::Settings, ModuleRegistry, Readiness};

pub mod error;
pub mod router;

use error::AppError;
use router::RouterBuilder;

/// Banner served at `/`
pub const ROOT_BANNER: &str = "Book Management System API is running...";

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new()
        .route("/", get(root))
        .route(
            "/healthz",
            get(health_check).with_state(registry.readiness()),
        );

    for module in registry.custom_modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under {}",
            router::module_prefix(module_name)
        );
        router_builder = router_builder.mount_module(module_name, module.routes());
    }

    router_builder
        .with_openapi(registry)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

/// Serve `app` until `shutdown` resolves
pub async fn start_server<F>(app: Router, settings: &Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", address);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to address {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

async fn root() -> &'static str {
    ROOT_BANNER
}

/// `ok` while every module reports ready, 503 otherwise
async fn health_check(State(readiness): State<Readiness>) -> Result<&'static str, AppError> {
    readiness.check().await.map_err(|error| {
        tracing::warn!(error = %format!("{error:#}"), "readiness check failed");
        AppError::unavailable(error.to_string())
    })?;
    Ok("ok")
}
