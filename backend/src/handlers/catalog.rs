//! Informational endpoints: overview, model status, class catalog, docs

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use shared::{Advice, CnnClass, FIELD_CONSTRAINTS};

use crate::AppState;

/// Endpoint names and their paths
pub async fn api_overview() -> Json<Value> {
    Json(json!({
        "Prédiction Image (CNN)": "/api/predict/image/",
        "Prédiction Données (Tabulaire)": "/api/predict/tabular/",
        "Test API": "/api/test/",
        "Statut Modèles": "/api/status/",
        "Classes CNN": "/api/classes/",
        "Documentation": "/api/docs/",
    }))
}

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub cnn_loaded: bool,
    pub tabular_loaded: bool,
    pub all_loaded: bool,
    pub available_classes: Vec<&'static str>,
    pub loaded_at: DateTime<Utc>,
}

/// Load state of both models
pub async fn model_status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    let store = &state.store;
    Json(ModelStatusResponse {
        cnn_loaded: store.is_image_model_loaded(),
        tabular_loaded: store.is_tabular_model_loaded(),
        all_loaded: store.is_fully_loaded(),
        available_classes: CnnClass::ALL.iter().map(CnnClass::as_str).collect(),
        loaded_at: store.loaded_at(),
    })
}

#[derive(Debug, Serialize)]
pub struct ClassesResponse {
    pub cnn_classes: BTreeMap<usize, &'static str>,
    pub advice_categories: [&'static str; 3],
}

/// CNN label table and the advice keys every entry carries
pub async fn available_classes() -> Json<ClassesResponse> {
    Json(ClassesResponse {
        cnn_classes: CnnClass::ALL
            .iter()
            .map(|class| (class.index(), class.as_str()))
            .collect(),
        advice_categories: Advice::FIELDS,
    })
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub models_loaded: bool,
}

/// Liveness check used by the frontend
pub async fn test_api(State(state): State<AppState>) -> Json<TestResponse> {
    Json(TestResponse {
        message: "API Weather Classification fonctionne correctement !",
        status: "active",
        models_loaded: state.store.is_fully_loaded(),
    })
}

/// Static description of the prediction endpoints
pub async fn api_docs() -> Json<Value> {
    let parameters: serde_json::Map<String, Value> = FIELD_CONSTRAINTS
        .iter()
        .map(|(field, constraint)| (field.to_string(), Value::String(constraint.describe())))
        .collect();

    Json(json!({
        "Prédiction Image": {
            "endpoint": "/api/predict/image/",
            "method": "POST",
            "format": "multipart/form-data",
            "parameters": {
                "image": "Fichier image (JPEG, PNG, WebP)",
            },
        },
        "Prédiction Tabulaire": {
            "endpoint": "/api/predict/tabular/",
            "method": "POST",
            "format": "application/json",
            "parameters": parameters,
        },
    }))
}
