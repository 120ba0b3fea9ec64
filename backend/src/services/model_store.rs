//! Model store
//!
//! Holds the two classifiers for the lifetime of the process. Each slot is
//! loaded independently at startup; a missing or unreadable artifact leaves
//! that slot `NotLoaded` without affecting the other one.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ModelsConfig;
use crate::inference::{
    ImageClassifier, OnnxImageClassifier, OnnxTabularClassifier, TabularClassifier,
};

/// A model that may or may not be available
pub enum ModelSlot<T: ?Sized> {
    Loaded(Box<T>),
    NotLoaded(String),
}

impl<T: ?Sized> ModelSlot<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelSlot::Loaded(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            ModelSlot::Loaded(model) => Some(model.as_ref()),
            ModelSlot::NotLoaded(_) => None,
        }
    }

    fn outcome(&self) -> LoadOutcome {
        match self {
            ModelSlot::Loaded(_) => LoadOutcome::Loaded,
            ModelSlot::NotLoaded(reason) => LoadOutcome::NotLoaded {
                reason: reason.clone(),
            },
        }
    }
}

/// Outcome of loading one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded,
    NotLoaded { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

/// Summary of the startup load, checked by `main`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub cnn: LoadOutcome,
    pub tabular: LoadOutcome,
}

impl LoadReport {
    pub fn is_fully_loaded(&self) -> bool {
        self.cnn.is_loaded() && self.tabular.is_loaded()
    }

    pub fn nothing_loaded(&self) -> bool {
        !self.cnn.is_loaded() && !self.tabular.is_loaded()
    }
}

/// Read-only holder of both classifiers
pub struct ModelStore {
    cnn: ModelSlot<dyn ImageClassifier>,
    tabular: ModelSlot<dyn TabularClassifier>,
    loaded_at: DateTime<Utc>,
}

impl ModelStore {
    /// Load both artifacts from the configured directory
    pub fn load(config: &ModelsConfig) -> Self {
        let cnn = load_slot("CNN", &config.cnn_path(), |path| {
            OnnxImageClassifier::load(path).map(|m| Box::new(m) as Box<dyn ImageClassifier>)
        });
        let tabular = load_slot("tabular", &config.tabular_path(), |path| {
            OnnxTabularClassifier::load(path).map(|m| Box::new(m) as Box<dyn TabularClassifier>)
        });

        Self::from_slots(cnn, tabular)
    }

    /// Build a store from already-constructed slots
    pub fn from_slots(
        cnn: ModelSlot<dyn ImageClassifier>,
        tabular: ModelSlot<dyn TabularClassifier>,
    ) -> Self {
        Self {
            cnn,
            tabular,
            loaded_at: Utc::now(),
        }
    }

    /// Store with both slots empty
    pub fn empty() -> Self {
        Self::from_slots(
            ModelSlot::NotLoaded("not configured".to_string()),
            ModelSlot::NotLoaded("not configured".to_string()),
        )
    }

    pub fn report(&self) -> LoadReport {
        LoadReport {
            cnn: self.cnn.outcome(),
            tabular: self.tabular.outcome(),
        }
    }

    pub fn image_model(&self) -> Option<&dyn ImageClassifier> {
        self.cnn.get()
    }

    pub fn tabular_model(&self) -> Option<&dyn TabularClassifier> {
        self.tabular.get()
    }

    pub fn is_image_model_loaded(&self) -> bool {
        self.cnn.is_loaded()
    }

    pub fn is_tabular_model_loaded(&self) -> bool {
        self.tabular.is_loaded()
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.is_image_model_loaded() && self.is_tabular_model_loaded()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn load_slot<T: ?Sized>(
    name: &str,
    path: &Path,
    load: impl FnOnce(&Path) -> anyhow::Result<Box<T>>,
) -> ModelSlot<T> {
    if !path.exists() {
        tracing::warn!("{} model file not found: {}", name, path.display());
        return ModelSlot::NotLoaded(format!("file not found: {}", path.display()));
    }

    match load(path) {
        Ok(model) => {
            tracing::info!("{} model loaded from {}", name, path.display());
            ModelSlot::Loaded(model)
        }
        Err(e) => {
            tracing::error!("Failed to load {} model from {}: {:#}", name, path.display(), e);
            ModelSlot::NotLoaded(format!("{:#}", e))
        }
    }
}
