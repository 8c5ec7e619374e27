use async_trait::async_trait;
use axum::Router;

/// Context handed to modules during `init` and `start`
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Lifecycle contract every bookclub module implements.
///
/// The registry drives `init` for all modules before any `start`, and stops
/// them in reverse registration order.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name; custom modules are mounted at `/{name}`
    fn name(&self) -> &'static str;

    /// Verify external dependencies before anything starts
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment (`paths` and `components`) merged into the service document
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Load data or spawn background work once every module is initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Readiness probe behind `/healthz`
    async fn ready(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
