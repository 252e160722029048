//! Ufo orchestration service

use crate::error::{PostoError, Result};
use crate::ports::UfoStore;
use crate::validation::validate;
use posto_types::Ufo;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// The one place business rules run.
///
/// Holds nothing but the store handle, so a single instance can be shared
/// by every request.
pub struct UfoService {
    store: Arc<dyn UfoStore>,
}

impl UfoService {
    pub fn new(store: Arc<dyn UfoStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new ufo. Validation failures never reach the
    /// store.
    pub async fn create(
        &self,
        model: &str,
        licence: &str,
        plate: &str,
        tank: i64,
        fuel: &str,
    ) -> Result<Ufo> {
        let tank = validate(model, licence, plate, tank, fuel)?;

        let ufo = Ufo::new(
            model.to_string(),
            licence.to_string(),
            plate.to_string(),
            tank,
            fuel.to_string(),
        );
        info!(id = %ufo.id, model = %ufo.model, tank = %ufo.tank, "creating ufo");

        self.store
            .persist(&ufo)
            .await
            .map_err(PostoError::storage("failed to persist ufo"))?;

        Ok(ufo)
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Ufo>> {
        debug!(%id, "fetching ufo");
        self.store
            .fetch_by_id(id)
            .await
            .map_err(PostoError::storage("failed to get ufo"))
    }

    pub async fn list(&self) -> Result<Vec<Ufo>> {
        self.store
            .list_all()
            .await
            .map_err(PostoError::storage("failed to list ufos"))
    }
}
