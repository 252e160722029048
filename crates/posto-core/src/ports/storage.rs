//! Storage traits for persistence

use crate::error::StoreError;
use async_trait::async_trait;
use posto_types::Ufo;
use uuid::Uuid;

/// Ufo store
///
/// Implementations must accept concurrent calls from many requests.
#[async_trait]
pub trait UfoStore: Send + Sync {
    /// Look a ufo up by id. An unknown id is `Ok(None)`, not an error.
    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Ufo>, StoreError>;

    /// Insert the ufo, or if its id already exists overwrite `plate`, `tank`
    /// and `fuel` (and the update time), keeping `model`, `licence` and the
    /// creation time.
    async fn persist(&self, ufo: &Ufo) -> Result<(), StoreError>;

    /// Every stored ufo, in no particular order.
    async fn list_all(&self) -> Result<Vec<Ufo>, StoreError>;
}
