//! Loading serialized classifiers from disk.
//!
//! Artifacts are JSON documents tagged by `kind`:
//!
//! ```json
//! { "kind": "logistic", "classes": [...], "intercepts": [...], "weights": {...} }
//! { "kind": "sgd", "classes": [...], "intercepts": [...], "weights": {...} }
//! { "kind": "categorical_nb", "classes": [...], "class_log_prior": [...], "feature_log_prob": {...} }
//! ```

use crate::classifier::{Classifier, ClassifierError};
use crate::linear::{LinearClassifier, LinearParams};
use crate::naive_bayes::{CategoricalNaiveBayes, NaiveBayesParams};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LinearParams),
    Sgd(LinearParams),
    CategoricalNb(NaiveBayesParams),
}

impl ModelArtifact {
    /// Turn decoded parameters into a runnable classifier
    pub fn into_classifier(self, name: &str) -> Result<Box<dyn Classifier>, ClassifierError> {
        Ok(match self {
            ModelArtifact::Logistic(params) | ModelArtifact::Sgd(params) => {
                Box::new(LinearClassifier::new(name, params)?)
            }
            ModelArtifact::CategoricalNb(params) => {
                Box::new(CategoricalNaiveBayes::new(name, params)?)
            }
        })
    }
}

/// A named classifier the ensemble expects to find in the models directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSlot {
    pub name: &'static str,
    pub file_name: &'static str,
}

/// The three classifiers voted on by default
pub const DEFAULT_SLOTS: [ModelSlot; 3] = [
    ModelSlot { name: "logistic", file_name: "logistic_model.json" },
    ModelSlot { name: "naive_bayes", file_name: "nb_model.json" },
    ModelSlot { name: "sgd", file_name: "sgd_model.json" },
];

/// Read and decode one classifier artifact
pub fn load_classifier(path: &Path, name: &str) -> Result<Box<dyn Classifier>, ClassifierError> {
    let raw = fs::read_to_string(path).map_err(|source| ClassifierError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let artifact: ModelArtifact =
        serde_json::from_str(&raw).map_err(|source| ClassifierError::Decode {
            path: path.display().to_string(),
            source,
        })?;
    artifact.into_classifier(name)
}
