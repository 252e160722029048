//! In-memory ufo store using DashMap

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use posto_core::{StoreError, Ufo, UfoStore};
use uuid::Uuid;

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryUfoStore {
    data: DashMap<Uuid, StoredUfo>,
}

struct StoredUfo {
    ufo: Ufo,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MemoryUfoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UfoStore for MemoryUfoStore {
    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Ufo>, StoreError> {
        Ok(self.data.get(&id).map(|entry| entry.ufo.clone()))
    }

    async fn persist(&self, ufo: &Ufo) -> Result<(), StoreError> {
        let now = Utc::now();
        match self.data.entry(ufo.id) {
            Entry::Occupied(mut occupied) => {
                let stored = occupied.get_mut();
                tracing::debug!(
                    id = %ufo.id,
                    created_at = %stored.created_at,
                    previous_update = %stored.updated_at,
                    "overwriting stored ufo"
                );
                stored.ufo.plate = ufo.plate.clone();
                stored.ufo.tank = ufo.tank;
                stored.ufo.fuel = ufo.fuel.clone();
                stored.updated_at = now;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredUfo {
                    ufo: ufo.clone(),
                    created_at: now,
                    updated_at: now,
                });
            }
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Ufo>, StoreError> {
        Ok(self.data.iter().map(|entry| entry.ufo.clone()).collect())
    }
}
