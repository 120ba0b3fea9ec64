//! Shared types and models for the weather classification service
//!
//! This crate contains the label sets, advisory tables, feature mapping and
//! input validation shared between the backend and the browser (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
