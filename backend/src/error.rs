//! Error handling for the weather classification service
//!
//! Every failure is rendered with the same JSON shape as a successful
//! prediction, with `success: false` and empty result fields. User-facing
//! messages are in French, like the rest of the API payloads.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{AdvisoryEntry, ClassScores, ModelKind};
use thiserror::Error;

/// Failures of the prediction core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Modèle {0} non chargé")]
    NotLoaded(ModelKind),

    #[error("Échec de la préparation de l'image : {0}")]
    ImagePreparation(String),

    #[error("Échec de la prédiction {model} : {message}")]
    Inference { model: ModelKind, message: String },
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Image invalide ou manquante : {0}")]
    InvalidImage(String),

    #[error("Données invalides")]
    Validation {
        details: BTreeMap<String, Vec<String>>,
    },

    #[error("Corps de requête invalide : {0}")]
    MalformedBody(String),

    // Model errors
    #[error("Modèle {0} non chargé")]
    ModelNotLoaded(ModelKind),

    #[error("Échec de la préparation de l'image : {0}")]
    ImagePreparation(String),

    #[error("{message}")]
    Prediction { model: ModelKind, message: String },
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::NotLoaded(model) => AppError::ModelNotLoaded(model),
            PredictionError::ImagePreparation(msg) => AppError::ImagePreparation(msg),
            PredictionError::Inference { model, message } => AppError::Prediction { model, message },
        }
    }
}

impl AppError {
    /// Model the failing request targeted
    pub fn model(&self) -> ModelKind {
        match self {
            AppError::InvalidImage(_) | AppError::ImagePreparation(_) => ModelKind::Cnn,
            AppError::Validation { .. } | AppError::MalformedBody(_) => ModelKind::Tabular,
            AppError::ModelNotLoaded(model) | AppError::Prediction { model, .. } => *model,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidImage(_) | AppError::Validation { .. } | AppError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::ModelNotLoaded(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ImagePreparation(_) | AppError::Prediction { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::InvalidImage(_) => "Image invalide ou manquante".to_string(),
            AppError::Validation { .. } | AppError::MalformedBody(_) => "Données invalides".to_string(),
            AppError::ModelNotLoaded(_) => "Modèles non chargés".to_string(),
            other => other.to_string(),
        }
    }
}

/// `details` key for errors not tied to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Response body shared by both prediction endpoints
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub model: &'static str,
    pub prediction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_predictions: Option<ClassScores>,
    pub advice: AdvisoryEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_used: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
    pub error: String,
}

impl PredictionResponse {
    /// Failure body with the empty defaults of `model`
    pub fn failure(model: ModelKind, error: String) -> Self {
        let (confidence, all_predictions, features_used) = match model {
            ModelKind::Cnn => (Some(0.0), Some(ClassScores::default()), None),
            ModelKind::Tabular => (None, None, Some(Vec::new())),
        };

        Self {
            success: false,
            model: model.label(),
            prediction: String::new(),
            confidence,
            all_predictions,
            advice: AdvisoryEntry::empty(),
            features_used,
            details: None,
            error,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!(model = %self.model(), "Error: {:?}", self);
        } else {
            tracing::warn!(model = %self.model(), "Rejected request: {}", self);
        }

        let mut body = PredictionResponse::failure(self.model(), self.message());
        body.details = match self {
            AppError::Validation { details } => Some(details),
            AppError::MalformedBody(reason) => {
                let reason = format!("JSON invalide : {}", reason);
                Some(BTreeMap::from([(NON_FIELD_ERRORS.to_string(), vec![reason])]))
            }
            _ => None,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
