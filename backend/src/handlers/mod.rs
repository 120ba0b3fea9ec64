//! HTTP handlers for the weather classification API

pub mod catalog;
pub mod health;
pub mod prediction;

pub use catalog::{api_docs, api_overview, available_classes, model_status, test_api};
pub use health::health_check;
pub use prediction::{predict_image, predict_tabular};
