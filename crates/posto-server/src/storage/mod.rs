//! Storage layer
//!
//! Two interchangeable [`UfoStore`] backends: PostgreSQL for durable
//! storage and a DashMap for runs that need nothing external.

pub mod db;
pub mod memory;

pub use db::{Dsn, DsnError, PgUfoStore};
pub use memory::MemoryUfoStore;

use crate::config::{Settings, StoreKind};
use anyhow::{Context, Result};
use posto_core::UfoStore;
use std::sync::Arc;

/// Build the store selected in `settings`.
pub async fn open(settings: &Settings) -> Result<Arc<dyn UfoStore>> {
    match settings.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store, data will not survive a restart");
            Ok(Arc::new(MemoryUfoStore::new()))
        }
        StoreKind::Postgres => {
            let raw = settings
                .dsn
                .as_deref()
                .context("A DSN is required for the postgres store (--dsn)")?;
            let dsn = Dsn::parse(raw)?;
            let store = PgUfoStore::connect(&dsn, settings.max_connections)
                .await
                .context("Failed to initialize database")?;
            Ok(Arc::new(store))
        }
    }
}
