//! Error types for Posto

use posto_types::TankSizeError;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, PostoError>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A caller-correctable rule violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusinessError {
    #[error(transparent)]
    UnsupportedTank(#[from] TankSizeError),

    #[error("ufo model is required")]
    MissingModel,

    #[error("ufo plate or licence is required")]
    MissingPlateOrLicence,

    #[error("ufo fuel is required")]
    MissingFuel,
}

/// Failure reported by a [`crate::UfoStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{operation} failed")]
    Backend {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("stored ufo {id} is invalid: {reason}")]
    InvalidRecord { id: Uuid, reason: String },
}

impl StoreError {
    pub fn backend<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend {
            operation,
            source: Box::new(source),
        }
    }
}

#[derive(Error, Debug)]
pub enum PostoError {
    #[error(transparent)]
    Business(#[from] BusinessError),

    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl PostoError {
    pub fn is_business(&self) -> bool {
        matches!(self, PostoError::Business(_))
    }

    pub(crate) fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| PostoError::Storage { context, source }
    }
}
