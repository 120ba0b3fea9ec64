//! Common types used across the service

use serde::{Deserialize, Serialize};

/// Which of the two classifiers produced (or was asked for) a prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Convolutional image classifier
    Cnn,
    /// Structured-feature classifier
    Tabular,
}

impl ModelKind {
    /// Label used in the `model` field of API responses
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Cnn => "CNN",
            ModelKind::Tabular => "Tabulaire",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Input geometry of the image classifier (NHWC, batch of one)
pub const IMAGE_SIZE: u32 = 128;
pub const IMAGE_CHANNELS: usize = 3;
pub const IMAGE_TENSOR_SHAPE: [usize; 4] = [1, IMAGE_SIZE as usize, IMAGE_SIZE as usize, IMAGE_CHANNELS];
