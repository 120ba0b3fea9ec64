//! HTTP handlers for the two prediction endpoints

use axum::{
    body::Bytes,
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        State,
    },
    Json,
};
use shared::{ModelKind, TabularInput};

use crate::error::{AppError, AppResult, PredictionResponse};
use crate::inference::{decode_upload, prepare_image};
use crate::services::PredictionService;
use crate::AppState;

/// Multipart field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

/// Classify an uploaded image with the CNN
pub async fn predict_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let multipart = multipart.map_err(|e| AppError::InvalidImage(e.body_text()))?;
    let bytes = read_image_field(multipart).await?;

    tracing::debug!(size = bytes.len(), "Received image upload");

    // Anything that does not decode is a bad upload, not a server fault
    let decoded = decode_upload(&bytes).map_err(|e| AppError::InvalidImage(e.to_string()))?;

    if !state.store.is_image_model_loaded() {
        return Err(AppError::ModelNotLoaded(ModelKind::Cnn));
    }

    let tensor = prepare_image(&decoded);

    let service = PredictionService::new(state.store.clone());
    let result = service.predict_image(tensor).await?;

    Ok(Json(PredictionResponse {
        success: true,
        model: ModelKind::Cnn.label(),
        prediction: result.prediction,
        confidence: Some(result.confidence),
        all_predictions: Some(result.all_predictions),
        advice: result.advice,
        features_used: None,
        details: None,
        error: String::new(),
    }))
}

/// Classify a set of weather measurements with the tabular model
pub async fn predict_tabular(
    State(state): State<AppState>,
    input: Result<Json<TabularInput>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(input) = input.map_err(|e| AppError::MalformedBody(e.body_text()))?;
    input
        .check()
        .map_err(|details| AppError::Validation { details })?;

    let service = PredictionService::new(state.store.clone());
    let result = service.predict_tabular(input.to_feature_vector()).await?;

    Ok(Json(PredictionResponse {
        success: true,
        model: ModelKind::Tabular.label(),
        prediction: result.prediction,
        confidence: None,
        all_predictions: None,
        advice: result.advice,
        features_used: Some(result.features_used),
        details: None,
        error: String::new(),
    }))
}

/// Pull the bytes of the `image` field, skipping any other parts
async fn read_image_field(mut multipart: Multipart) -> AppResult<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidImage(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidImage(e.body_text()))?;
        if bytes.is_empty() {
            return Err(AppError::InvalidImage("empty file".to_string()));
        }
        return Ok(bytes);
    }

    Err(AppError::InvalidImage(format!("missing `{}` field", IMAGE_FIELD)))
}
