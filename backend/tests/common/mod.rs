//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use shared::FeatureVector;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use weather_classification_backend::{
    config::Config,
    create_app,
    inference::{ImageClassifier, ImageTensor, TabularClassifier},
    services::ModelSlot,
    AppState, ModelStore,
};

pub const BOUNDARY: &str = "wcs-test-boundary";

/// Image classifier returning fixed scores
pub struct StubImageModel(pub Vec<f32>);

impl ImageClassifier for StubImageModel {
    fn predict(&self, _input: &ImageTensor) -> anyhow::Result<Vec<f32>> {
        Ok(self.0.clone())
    }
}

/// Tabular classifier returning a fixed label
pub struct StubTabularModel(pub &'static str);

impl TabularClassifier for StubTabularModel {
    fn predict(&self, _features: &FeatureVector) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Tabular classifier that keeps the last vector it was given
#[derive(Clone, Default)]
pub struct RecordingTabularModel {
    seen: Arc<Mutex<Option<FeatureVector>>>,
}

impl RecordingTabularModel {
    pub fn last_seen(&self) -> Option<FeatureVector> {
        *self.seen.lock().unwrap()
    }
}

impl TabularClassifier for RecordingTabularModel {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<String> {
        *self.seen.lock().unwrap() = Some(*features);
        Ok("Cloudy".to_string())
    }
}

/// Classifier that always errors
pub struct BrokenModel;

impl ImageClassifier for BrokenModel {
    fn predict(&self, _input: &ImageTensor) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("graph evaluation failed")
    }
}

impl TabularClassifier for BrokenModel {
    fn predict(&self, _features: &FeatureVector) -> anyhow::Result<String> {
        anyhow::bail!("graph evaluation failed")
    }
}

pub fn cloudy_scores() -> Vec<f32> {
    vec![0.1, 0.7, 0.05, 0.05, 0.02, 0.03, 0.02, 0.02, 0.01]
}

pub fn loaded<T: ?Sized>(model: Box<T>) -> ModelSlot<T> {
    ModelSlot::Loaded(model)
}

pub fn missing<T: ?Sized>() -> ModelSlot<T> {
    ModelSlot::NotLoaded("file not found: models/test.onnx".to_string())
}

pub fn app_with(
    cnn: ModelSlot<dyn ImageClassifier>,
    tabular: ModelSlot<dyn TabularClassifier>,
) -> NormalizePath<Router> {
    app_with_config(cnn, tabular, Config::default())
}

pub fn app_with_config(
    cnn: ModelSlot<dyn ImageClassifier>,
    tabular: ModelSlot<dyn TabularClassifier>,
    config: Config,
) -> NormalizePath<Router> {
    create_app(AppState::new(ModelStore::from_slots(cnn, tabular), config))
}

/// App with both stub models loaded
pub fn full_app() -> NormalizePath<Router> {
    app_with(
        loaded(Box::new(StubImageModel(cloudy_scores()))),
        loaded(Box::new(StubTabularModel("Sunny"))),
    )
}

pub async fn send(app: NormalizePath<Router>, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Multipart request with a single file part
pub fn post_file(uri: &str, field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Small PNG of a single color
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([120, 160, 220]),
    ));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}

/// Tabular payload with every field inside its range
pub fn valid_measurements() -> Value {
    serde_json::json!({
        "wind_speed": 12.5,
        "precipitation": 20.0,
        "temperature": 18.0,
        "humidity": 65.0,
        "pressure": 1013.0,
        "solar_radiation": 1,
        "cloud_cover": 40.0,
        "visibility": 10.0,
        "dew_point": 9.5,
        "uv_index": 4.0
    })
}
