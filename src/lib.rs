//! Bookclub application library
//!
//! Wires the book store, the `books` module, and the HTTP facade together.

use std::future::Future;

use axum::Router;
use bookclub_db::{MemoryBookStore, SharedBookStore};
use bookclub_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;

/// Registry holding the store module and the books module
pub fn registry(store: SharedBookStore, settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store, settings);
    registry
}

/// Full HTTP surface for `store`, without running any module lifecycle
pub fn app(store: SharedBookStore, settings: &Settings) -> Router {
    bookclub_http::build_router(&registry(store, settings), settings)
}

/// Run the service until `shutdown` resolves, then stop every module.
pub async fn run<F>(settings: Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = MemoryBookStore::shared();
    let registry = registry(store, &settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let router = bookclub_http::build_router(&registry, &settings);
    let served = bookclub_http::start_server(router, &settings, shutdown).await;

    // Stop modules even when the server failed, then report the first error.
    let stopped = registry.stop_all().await;
    served.and(stopped)
}
