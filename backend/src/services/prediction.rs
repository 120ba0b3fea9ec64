//! Prediction service
//!
//! Runs the classifiers held by the model store and turns raw model output
//! into prediction records. Inference is CPU-bound and runs on the blocking
//! thread pool.

use std::sync::Arc;

use shared::{FeatureVector, ImagePrediction, ModelKind, TabularPrediction};

use crate::error::PredictionError;
use crate::inference::ImageTensor;
use crate::services::ModelStore;

/// Prediction service over a shared model store
#[derive(Clone)]
pub struct PredictionService {
    store: Arc<ModelStore>,
}

impl PredictionService {
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self { store }
    }

    /// Classify a prepared image tensor
    pub async fn predict_image(
        &self,
        tensor: ImageTensor,
    ) -> Result<ImagePrediction, PredictionError> {
        if !self.store.is_image_model_loaded() {
            return Err(PredictionError::NotLoaded(ModelKind::Cnn));
        }

        let store = Arc::clone(&self.store);
        let scores = run_blocking(ModelKind::Cnn, move || {
            let model = store
                .image_model()
                .ok_or(PredictionError::NotLoaded(ModelKind::Cnn))?;
            model
                .predict(&tensor)
                .map_err(|e| inference_error(ModelKind::Cnn, e))
        })
        .await?;

        let prediction =
            ImagePrediction::from_scores(&scores).ok_or_else(|| PredictionError::Inference {
                model: ModelKind::Cnn,
                message: "model returned no scores".to_string(),
            })?;

        tracing::info!(
            prediction = %prediction.prediction,
            confidence = prediction.confidence,
            "CNN prediction"
        );

        Ok(prediction)
    }

    /// Classify a normalized feature vector
    pub async fn predict_tabular(
        &self,
        features: FeatureVector,
    ) -> Result<TabularPrediction, PredictionError> {
        if !self.store.is_tabular_model_loaded() {
            return Err(PredictionError::NotLoaded(ModelKind::Tabular));
        }

        let store = Arc::clone(&self.store);
        let label = run_blocking(ModelKind::Tabular, move || {
            let model = store
                .tabular_model()
                .ok_or(PredictionError::NotLoaded(ModelKind::Tabular))?;
            model
                .predict(&features)
                .map_err(|e| inference_error(ModelKind::Tabular, e))
        })
        .await?;

        let prediction = TabularPrediction::from_label(label);
        tracing::info!(prediction = %prediction.prediction, "Tabular prediction");

        Ok(prediction)
    }
}

fn inference_error(model: ModelKind, err: anyhow::Error) -> PredictionError {
    tracing::error!("{} inference failed: {:#}", model, err);
    PredictionError::Inference {
        model,
        message: format!("{:#}", err),
    }
}

async fn run_blocking<T, F>(model: ModelKind, task: F) -> Result<T, PredictionError>
where
    F: FnOnce() -> Result<T, PredictionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| PredictionError::Inference {
            model,
            message: format!("inference task failed: {}", e),
        })?
}
