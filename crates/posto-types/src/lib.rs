//! Posto Types - Pure type definitions
//!
//! This crate contains only the data shapes shared by the service and its
//! transports, with no async runtime or storage dependencies.

pub mod tank;
pub mod ufo;

pub use tank::{TankSize, TankSizeError};
pub use ufo::Ufo;
