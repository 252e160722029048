//! Posto Core Library
//!
//! Business rules, the storage port, and the endpoint pipeline for the Posto
//! ufo registry. Transports and storage backends live in `posto-server`.

// Re-export pure types from posto-types
pub use posto_types::*;

pub mod endpoint;
pub mod error;
pub mod middleware;
pub mod ports;
pub mod service;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use endpoint::{
    CreateUfoRequest, Endpoints, FetchUfoRequest, ListUfosRequest,
};
pub use error::{BusinessError, PostoError, Result, StoreError};
pub use ports::UfoStore;
pub use service::UfoService;
pub use validation::validate;
