//! One-hot linear classifiers (logistic regression and SGD-trained).
//!
//! Both kinds share the same decision rule:
//! `score[c] = intercept[c] + Σ weights[feature][value][c]`, label = argmax.
//! A value without a weight row contributes nothing, matching a one-hot
//! encoder that ignores unknown categories.

use crate::classifier::{Classifier, ClassifierError, argmax};
use crate::features::FeatureRecord;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Serialized parameters of a linear model
#[derive(Debug, Clone, Deserialize)]
pub struct LinearParams {
    pub classes: Vec<String>,
    pub intercepts: Vec<f64>,
    /// feature name -> category value -> per-class weight
    pub weights: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    name: String,
    params: LinearParams,
}

impl LinearClassifier {
    /// Build a classifier, rejecting parameters whose shapes disagree
    pub fn new(name: impl Into<String>, params: LinearParams) -> Result<Self, ClassifierError> {
        let name = name.into();
        let n_classes = params.classes.len();
        let malformed = |reason: String| ClassifierError::Malformed {
            model: name.clone(),
            reason,
        };

        if n_classes == 0 {
            return Err(malformed("no classes".to_string()));
        }
        if params.intercepts.len() != n_classes {
            return Err(malformed(format!(
                "{} intercepts for {} classes",
                params.intercepts.len(),
                n_classes
            )));
        }
        for (feature, values) in &params.weights {
            for (value, row) in values {
                if row.len() != n_classes {
                    return Err(malformed(format!(
                        "weights for {}={} have {} entries, expected {}",
                        feature,
                        value,
                        row.len(),
                        n_classes
                    )));
                }
            }
        }

        Ok(Self { name, params })
    }

    /// Per-class decision scores for one row
    pub fn decision_function(&self, features: &FeatureRecord) -> Result<Vec<f64>, ClassifierError> {
        let mut scores = self.params.intercepts.clone();

        for (feature, values) in &self.params.weights {
            let value = features
                .get(feature)
                .ok_or_else(|| ClassifierError::MissingFeature {
                    model: self.name.clone(),
                    feature: feature.clone(),
                })?;

            if let Some(row) = values.get(value) {
                for (score, weight) in scores.iter_mut().zip(row) {
                    *score += weight;
                }
            }
        }

        Ok(scores)
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureRecord) -> Result<String, ClassifierError> {
        let scores = self.decision_function(features)?;
        // `new` guarantees at least one class
        let best = argmax(&scores).unwrap_or(0);
        Ok(self.params.classes[best].clone())
    }
}
