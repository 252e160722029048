//! Ufo types

use crate::TankSize;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered ufo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ufo {
    pub id: Uuid,
    pub model: String,
    pub licence: String,
    pub plate: String,
    pub tank: TankSize,
    pub fuel: String,
}

impl Ufo {
    /// Build a ufo with a freshly generated id.
    ///
    /// Callers are expected to have validated the fields already.
    pub fn new(
        model: String,
        licence: String,
        plate: String,
        tank: TankSize,
        fuel: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            model,
            licence,
            plate,
            tank,
            fuel,
        }
    }
}
