//! ONNX-backed classifiers
//!
//! Both artifacts are loaded with `tract`, pinned to a batch of one and
//! optimized once at startup. A runnable plan is immutable and safe to share
//! between request handlers.

use std::path::Path;

use anyhow::{bail, Context};
use shared::{FeatureVector, FEATURE_COUNT, IMAGE_TENSOR_SHAPE};
use tract_onnx::prelude::*;

use super::{ImageClassifier, ImageTensor, TabularClassifier};

type Plan = TypedSimplePlan<TypedModel>;

fn load_plan(path: &Path, input_shape: &[usize]) -> anyhow::Result<Plan> {
    let plan = tract_onnx::onnx()
        .model_for_path(path)
        .with_context(|| format!("failed to read ONNX model {}", path.display()))?
        .with_input_fact(0, f32::fact(input_shape.to_vec()).into())?
        .into_optimized()?
        .into_runnable()?;
    Ok(plan)
}

/// Image classifier exported from the Keras CNN
pub struct OnnxImageClassifier {
    plan: Plan,
}

impl OnnxImageClassifier {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            plan: load_plan(path, &IMAGE_TENSOR_SHAPE)?,
        })
    }
}

impl ImageClassifier for OnnxImageClassifier {
    fn predict(&self, input: &ImageTensor) -> anyhow::Result<Vec<f32>> {
        let tensor = Tensor::from_shape(&input.shape(), input.as_slice())?;
        let outputs = self.plan.run(tvec!(tensor.into()))?;
        let scores = outputs
            .first()
            .context("image model produced no output")?
            .to_array_view::<f32>()?;
        Ok(scores.iter().copied().collect())
    }
}

/// Tabular classifier exported from scikit-learn (zipmap disabled)
pub struct OnnxTabularClassifier {
    plan: Plan,
}

impl OnnxTabularClassifier {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            plan: load_plan(path, &[1, FEATURE_COUNT])?,
        })
    }
}

impl TabularClassifier for OnnxTabularClassifier {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<String> {
        let tensor = Tensor::from_shape(&[1, FEATURE_COUNT], &features.to_f32())?;
        let outputs = self.plan.run(tvec!(tensor.into()))?;
        let labels = outputs
            .first()
            .context("tabular model produced no output")?
            .cast_to::<String>()?;

        match labels.as_slice::<String>()?.first() {
            Some(label) => Ok(label.clone()),
            None => bail!("tabular model returned an empty label tensor"),
        }
    }
}
