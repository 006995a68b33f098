//! Category prediction from categorical user attributes.
//!
//! This crate provides:
//! - `FeatureRecord`: the single feature row a prediction runs on
//! - `Classifier`: the `predict(features) -> label` capability
//! - Linear (logistic / SGD) and categorical naive Bayes implementations
//! - Artifact loading from JSON model files
//! - `Ensemble`: plurality voting across the loaded classifiers
//!
//! ## Example Usage
//! ```ignore
//! use predictor::{Ensemble, FeatureRecord};
//!
//! let ensemble = Ensemble::load_from_dir(Path::new("models"));
//! let record = FeatureRecord::new()
//!     .with("skin_type", "Oily")
//!     .with("skin_tone", "Fair")
//!     .with("hair_color", "Black")
//!     .with("eye_color", "Brown");
//! let prediction = ensemble.predict(&record);
//! println!("{} ({} votes)", prediction.category, prediction.votes.len());
//! ```

pub mod artifact;
pub mod classifier;
pub mod ensemble;
pub mod features;
pub mod linear;
pub mod naive_bayes;

pub use artifact::{DEFAULT_SLOTS, ModelArtifact, ModelSlot, load_classifier};
pub use classifier::{Classifier, ClassifierError};
pub use ensemble::{DEFAULT_CATEGORY, Ensemble, Prediction, PredictionVote, plurality};
pub use features::FeatureRecord;
pub use linear::{LinearClassifier, LinearParams};
pub use naive_bayes::{CategoricalNaiveBayes, NaiveBayesParams};
