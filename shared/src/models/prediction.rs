//! Prediction result models

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::advisory::{lookup, AdvisoryEntry, AdvisoryTable};
use super::category::{cnn_label, CnnClass};
use super::features::FEATURE_NAMES;

/// Per-class scores in output-index order, serialized as a label → score map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassScores(Vec<(String, f32)>);

impl ClassScores {
    /// Label every score by its index; indices past the table become `Class_<i>`
    pub fn from_scores(scores: &[f32]) -> Self {
        Self(
            scores
                .iter()
                .enumerate()
                .map(|(i, &score)| {
                    let label = CnnClass::from_index(i)
                        .map(|c| c.as_str().to_string())
                        .unwrap_or_else(|| format!("Class_{}", i));
                    (label, score)
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(label, score)| (label.as_str(), *score))
    }

    pub fn get(&self, label: &str) -> Option<f32> {
        self.iter().find(|(l, _)| *l == label).map(|(_, s)| s)
    }

    pub fn total(&self) -> f32 {
        self.0.iter().map(|(_, s)| s).sum()
    }
}

impl Serialize for ClassScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, score) in &self.0 {
            map.serialize_entry(label, score)?;
        }
        map.end()
    }
}

/// Index of the highest score; ties go to the lowest index and NaN never wins
pub fn argmax(scores: &[f32]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }

    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    // all-NaN output still names a class
    Some(best.map(|(i, _)| i).unwrap_or(0))
}

/// Image classifier outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePrediction {
    pub prediction: String,
    pub confidence: f32,
    pub all_predictions: ClassScores,
    pub advice: AdvisoryEntry,
}

impl ImagePrediction {
    /// Build from raw model scores; `None` when the model returned nothing
    pub fn from_scores(scores: &[f32]) -> Option<Self> {
        let index = argmax(scores)?;
        let prediction = cnn_label(index).to_string();
        let advice = lookup(AdvisoryTable::Image, &prediction);

        Some(Self {
            confidence: scores[index],
            all_predictions: ClassScores::from_scores(scores),
            advice,
            prediction,
        })
    }
}

/// Tabular classifier outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularPrediction {
    pub prediction: String,
    pub advice: AdvisoryEntry,
    pub features_used: Vec<&'static str>,
}

impl TabularPrediction {
    /// Build from the label emitted by the model
    pub fn from_label(label: impl Into<String>) -> Self {
        let prediction = label.into();
        let advice = lookup(AdvisoryTable::Tabular, &prediction);

        Self {
            prediction,
            advice,
            features_used: FEATURE_NAMES.to_vec(),
        }
    }
}
