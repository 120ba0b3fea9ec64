//! Model inference
//!
//! The prediction service talks to the two classifiers through the traits
//! below, so the ONNX runtime can be swapped for stubs in tests.

pub mod onnx;
pub mod preprocess;

use shared::FeatureVector;

pub use onnx::{OnnxImageClassifier, OnnxTabularClassifier};
pub use preprocess::{decode_upload, prepare_image, prepare_upload, ImageTensor};

/// Image classifier returning one score per class, in class-index order
pub trait ImageClassifier: Send + Sync {
    fn predict(&self, input: &ImageTensor) -> anyhow::Result<Vec<f32>>;
}

/// Tabular classifier returning the predicted label in string form
pub trait TabularClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<String>;
}
