use anyhow::Context;
use async_trait::async_trait;
use bookclub_kernel::{InitCtx, Module};

use crate::seed::seed_from_file;
use crate::store::SharedBookStore;

/// Core module owning the book store connection lifecycle.
pub struct StoreModule {
    store: SharedBookStore,
}

impl StoreModule {
    pub fn new(store: SharedBookStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedBookStore {
        &self.store
    }
}

#[async_trait]
impl Module for StoreModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.store
            .ping()
            .await
            .context("book store did not answer ping")?;

        tracing::info!(
            module = self.name(),
            database = %ctx.settings.database.name,
            collection = %ctx.settings.database.collection,
            "connected to book store"
        );
        Ok(())
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let Some(path) = ctx.settings.database.seed_path.as_deref() else {
            return Ok(());
        };

        // Seed failures are logged, never fatal.
        match seed_from_file(self.store.as_ref(), path).await {
            Ok(0) => {}
            Ok(inserted) => tracing::info!(
                module = self.name(),
                inserted,
                path = %path.display(),
                "seeded books collection"
            ),
            Err(error) => tracing::error!(
                module = self.name(),
                error = ?error,
                "failed to seed books collection"
            ),
        }
        Ok(())
    }

    async fn ready(&self) -> anyhow::Result<()> {
        self.store.ping().await.context("book store did not answer ping")
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.store.close().await;
        tracing::info!(module = self.name(), "book store closed");
        Ok(())
    }
}
