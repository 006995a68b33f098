//! Plurality voting over independently loaded classifiers.

use crate::artifact::{DEFAULT_SLOTS, ModelSlot, load_classifier};
use crate::classifier::Classifier;
use crate::features::FeatureRecord;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Category used when no classifier produced a vote
pub const DEFAULT_CATEGORY: &str = "General Skincare";

/// The label one classifier returned for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionVote {
    pub model: String,
    pub label: String,
}

/// Outcome of an ensemble prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub category: String,
    pub votes: Vec<PredictionVote>,
    /// True when no classifier voted and `DEFAULT_CATEGORY` was used
    pub fallback: bool,
}

/// N classifiers voted by plurality.
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Default)]
pub struct Ensemble {
    classifiers: Vec<Box<dyn Classifier>>,
}

impl Ensemble {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a classifier (builder pattern)
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    /// Load the default model slots from a directory.
    ///
    /// Never fails: a slot whose artifact is missing or malformed is logged
    /// and left out, so the ensemble may end up with fewer voters (or none).
    pub fn load_from_dir(models_dir: &Path) -> Self {
        Self::load_slots(models_dir, &DEFAULT_SLOTS)
    }

    pub fn load_slots(models_dir: &Path, slots: &[ModelSlot]) -> Self {
        let mut classifiers = Vec::with_capacity(slots.len());
        for slot in slots {
            let path = models_dir.join(slot.file_name);
            match load_classifier(&path, slot.name) {
                Ok(classifier) => {
                    info!("Loaded classifier {} from {:?}", slot.name, path);
                    classifiers.push(classifier);
                }
                Err(e) => {
                    warn!("Classifier {} unavailable, skipping: {}", slot.name, e);
                }
            }
        }
        info!("Ensemble ready with {}/{} classifiers", classifiers.len(), slots.len());
        Self { classifiers }
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    pub fn classifier_names(&self) -> Vec<&str> {
        self.classifiers.iter().map(|c| c.name()).collect()
    }

    /// Run every classifier on the same row and take the plurality label.
    ///
    /// A classifier that errors is skipped for this request only.
    pub fn predict(&self, features: &FeatureRecord) -> Prediction {
        let mut votes = Vec::with_capacity(self.classifiers.len());
        for classifier in &self.classifiers {
            match classifier.predict(features) {
                Ok(label) => {
                    debug!("Classifier {} voted {}", classifier.name(), label);
                    votes.push(PredictionVote {
                        model: classifier.name().to_string(),
                        label,
                    });
                }
                Err(e) => warn!("Classifier {} skipped: {}", classifier.name(), e),
            }
        }

        let labels: Vec<&str> = votes.iter().map(|v| v.label.as_str()).collect();
        let winner = plurality(&labels).map(str::to_string);
        match winner {
            Some(category) => Prediction {
                category,
                votes,
                fallback: false,
            },
            None => {
                warn!("No classifier produced a vote, falling back to {}", DEFAULT_CATEGORY);
                Prediction {
                    category: DEFAULT_CATEGORY.to_string(),
                    votes,
                    fallback: true,
                }
            }
        }
    }
}

/// Most frequent label; among equal counts the one seen first wins
pub fn plurality<'a>(labels: &[&'a str]) -> Option<&'a str> {
    // (label, count) in first-seen order
    let mut tally: Vec<(&'a str, usize)> = Vec::new();
    for &label in labels {
        match tally.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut winner: Option<(&'a str, usize)> = None;
    for (label, count) in tally {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((label, count)),
        }
    }
    winner.map(|(label, _)| label)
}
