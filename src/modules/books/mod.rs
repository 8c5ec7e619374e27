pub mod catalog;
pub mod models;
mod openapi;
pub mod query;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookclub_db::SharedBookStore;
use bookclub_kernel::{settings::Settings, InitCtx, Module};

use catalog::Catalog;

/// Books module: the catalog listing and CRUD surface under `/books`
pub struct BooksModule {
    catalog: Catalog,
}

impl BooksModule {
    pub fn new(store: SharedBookStore, settings: &Settings) -> Self {
        Self {
            catalog: Catalog::new(store, settings.catalog.default_page_size),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            default_page_size = self.catalog.default_page_size(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::document())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: SharedBookStore, settings: &Settings) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store, settings))
}
