//! Shared types and logic for the FoodLoop platform
//!
//! This crate holds the domain records exchanged between the backend and the
//! browser (via WASM), together with the pure routines both sides need:
//! supplier safety scoring, proximity matching and the demo geocoder.

pub mod geocode;
pub mod models;
pub mod proximity;
pub mod scoring;
pub mod types;
pub mod validation;

pub use geocode::*;
pub use models::*;
pub use proximity::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
