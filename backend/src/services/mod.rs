//! Services for the weather classification backend

pub mod model_store;
pub mod prediction;

pub use model_store::{LoadOutcome, LoadReport, ModelSlot, ModelStore};
pub use prediction::PredictionService;
