//! The classifier capability shared by every model kind.

use crate::features::FeatureRecord;
use thiserror::Error;

/// Errors raised while loading or running a classifier
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode model artifact {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed model {model}: {reason}")]
    Malformed { model: String, reason: String },

    #[error("Model {model} requires feature {feature}, which is missing from the input")]
    MissingFeature { model: String, feature: String },

    #[error("Model {model} has never seen {value} for feature {feature}")]
    UnknownCategory {
        model: String,
        feature: String,
        value: String,
    },
}

/// Anything that maps a feature row to a category label.
///
/// `Send + Sync` so one loaded ensemble can serve every request.
pub trait Classifier: Send + Sync {
    /// Returns the name of this classifier (for logging and votes)
    fn name(&self) -> &str;

    /// Predict a label for a single feature row
    fn predict(&self, features: &FeatureRecord) -> Result<String, ClassifierError>;
}

/// Index of the largest score; ties go to the earlier class
pub(crate) fn argmax(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}
