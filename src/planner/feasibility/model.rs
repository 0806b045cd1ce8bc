// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::features::{Feature, FeatureVector};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact lists no features")]
    NoFeatures,
    #[error("unknown feature '{0}' in model artifact")]
    UnknownFeature(String),
    #[error("feature '{0}' listed more than once")]
    DuplicateFeature(String),
    #[error("scaler {which} has {got} entries, expected {expected}")]
    Misaligned {
        which: &'static str,
        got: usize,
        expected: usize,
    },
    #[error("no weight for feature '{0}'")]
    MissingWeight(String),
    #[error("non-finite coefficient for '{0}'")]
    NonFinite(String),
}

/// On-disk shape of the pretrained model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub features: Vec<String>,
    pub scaler: Scaler,
    pub weights: HashMap<String, f64>,
    pub bias: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// A validated model: one entry per feature, in artifact order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityModel {
    layout: Vec<Feature>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    weights: Vec<f64>,
    bias: f64,
}

/// Result of evaluating the model on one feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub logit: f64,
    pub probability: f64,
    /// `weight * scaled` per feature, in artifact order.
    pub contributions: Vec<(Feature, f64)>,
}

impl FeasibilityModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let n = artifact.features.len();
        if n == 0 {
            return Err(ModelError::NoFeatures);
        }
        for (which, v) in [("mean", &artifact.scaler.mean), ("scale", &artifact.scaler.scale)] {
            if v.len() != n {
                return Err(ModelError::Misaligned {
                    which,
                    got: v.len(),
                    expected: n,
                });
            }
        }
        if !artifact.bias.is_finite() {
            return Err(ModelError::NonFinite("bias".into()));
        }

        let mut seen = HashSet::with_capacity(n);
        let mut layout = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);
        for (i, name) in artifact.features.iter().enumerate() {
            let feature =
                Feature::from_name(name).ok_or_else(|| ModelError::UnknownFeature(name.clone()))?;
            if !seen.insert(feature) {
                return Err(ModelError::DuplicateFeature(name.clone()));
            }
            let w = *artifact
                .weights
                .get(name)
                .ok_or_else(|| ModelError::MissingWeight(name.clone()))?;
            if !(w.is_finite()
                && artifact.scaler.mean[i].is_finite()
                && artifact.scaler.scale[i].is_finite())
            {
                return Err(ModelError::NonFinite(name.clone()));
            }
            layout.push(feature);
            weights.push(w);
        }

        Ok(FeasibilityModel {
            layout,
            mean: artifact.scaler.mean,
            scale: artifact.scaler.scale,
            weights,
            bias: artifact.bias,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn features(&self) -> &[Feature] {
        &self.layout
    }

    /// Standardize, take the weighted sum and squash it to a probability.
    pub fn score(&self, v: &FeatureVector) -> Scored {
        let mut logit = self.bias;
        let mut contributions = Vec::with_capacity(self.layout.len());
        for (i, feature) in self.layout.iter().enumerate() {
            let scaled = if self.scale[i] == 0.0 {
                0.0
            } else {
                (v.value(*feature) - self.mean[i]) / self.scale[i]
            };
            let c = self.weights[i] * scaled;
            logit += c;
            contributions.push((*feature, c));
        }
        Scored {
            logit,
            probability: sigmoid(logit),
            contributions,
        }
    }
}

/// Logistic function, split by sign so large magnitudes saturate cleanly.
pub fn sigmoid(x: f64) -> f64 {
    if x.is_nan() {
        return 0.5;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

enum ModelSource {
    File(PathBuf),
    Json(String),
    Disabled,
}

/// Owns the feasibility model for whoever composes the predictor.
///
/// The artifact is parsed on first use and cached for the life of the
/// context. A failed load is cached too, leaving the predictor disabled.
pub struct ModelContext {
    source: ModelSource,
    cell: OnceCell<Option<FeasibilityModel>>,
}

impl ModelContext {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        ModelContext {
            source: ModelSource::File(path.into()),
            cell: OnceCell::new(),
        }
    }

    pub fn from_json(json: impl Into<String>) -> Self {
        ModelContext {
            source: ModelSource::Json(json.into()),
            cell: OnceCell::new(),
        }
    }

    pub fn from_model(model: FeasibilityModel) -> Self {
        ModelContext {
            source: ModelSource::Disabled,
            cell: OnceCell::with_value(Some(model)),
        }
    }

    pub fn disabled() -> Self {
        ModelContext {
            source: ModelSource::Disabled,
            cell: OnceCell::new(),
        }
    }

    pub fn model(&self) -> Option<&FeasibilityModel> {
        self.cell.get_or_init(|| self.load()).as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    fn load(&self) -> Option<FeasibilityModel> {
        let loaded = match &self.source {
            ModelSource::File(path) => FeasibilityModel::from_file(path),
            ModelSource::Json(json) => FeasibilityModel::from_json(json),
            ModelSource::Disabled => return None,
        };
        match loaded {
            Ok(model) => {
                debug!(features = model.layout.len(), "feasibility model loaded");
                Some(model)
            }
            Err(err) => {
                warn!(error = %err, "feasibility model unavailable, predictor disabled");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(f64::NEG_INFINITY), 0.0);
        assert_eq!(sigmoid(f64::INFINITY), 1.0);
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }

    #[test]
    fn rejects_duplicate_and_missing_weight() {
        let dup = r#"{"features":["months_left","months_left"],
            "scaler":{"mean":[0,0],"scale":[1,1]},
            "weights":{"months_left":1.0},"bias":0}"#;
        assert!(matches!(
            FeasibilityModel::from_json(dup),
            Err(ModelError::DuplicateFeature(_))
        ));
        let missing = r#"{"features":["months_left"],
            "scaler":{"mean":[0],"scale":[1]},
            "weights":{},"bias":0}"#;
        assert!(matches!(
            FeasibilityModel::from_json(missing),
            Err(ModelError::MissingWeight(_))
        ));
    }
}
