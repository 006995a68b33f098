//! Categorical naive Bayes.
//!
//! Joint log likelihood per class is the class log prior plus, for every
//! feature, the log probability of the observed value given the class.
//! Unlike the linear models, an unseen value is an error.

use crate::classifier::{Classifier, ClassifierError, argmax};
use crate::features::FeatureRecord;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct NaiveBayesParams {
    pub classes: Vec<String>,
    pub class_log_prior: Vec<f64>,
    /// feature name -> category value -> per-class log probability
    pub feature_log_prob: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
}

#[derive(Debug, Clone)]
pub struct CategoricalNaiveBayes {
    name: String,
    params: NaiveBayesParams,
}

impl CategoricalNaiveBayes {
    pub fn new(name: impl Into<String>, params: NaiveBayesParams) -> Result<Self, ClassifierError> {
        let name = name.into();
        let n_classes = params.classes.len();

        let check = |what: &str, len: usize| -> Result<(), ClassifierError> {
            if len != n_classes {
                return Err(ClassifierError::Malformed {
                    model: name.clone(),
                    reason: format!("{} has {} entries, expected {}", what, len, n_classes),
                });
            }
            Ok(())
        };

        if n_classes == 0 {
            return Err(ClassifierError::Malformed {
                model: name.clone(),
                reason: "no classes".to_string(),
            });
        }
        check("class_log_prior", params.class_log_prior.len())?;
        for (feature, values) in &params.feature_log_prob {
            for (value, row) in values {
                check(&format!("feature_log_prob[{}][{}]", feature, value), row.len())?;
            }
        }

        Ok(Self { name, params })
    }

    /// Unnormalized joint log likelihood per class
    pub fn joint_log_likelihood(&self, features: &FeatureRecord) -> Result<Vec<f64>, ClassifierError> {
        let mut jll = self.params.class_log_prior.clone();

        for (feature, values) in &self.params.feature_log_prob {
            let value = features
                .get(feature)
                .ok_or_else(|| ClassifierError::MissingFeature {
                    model: self.name.clone(),
                    feature: feature.clone(),
                })?;

            let row = values
                .get(value)
                .ok_or_else(|| ClassifierError::UnknownCategory {
                    model: self.name.clone(),
                    feature: feature.clone(),
                    value: value.to_string(),
                })?;

            for (total, log_prob) in jll.iter_mut().zip(row) {
                *total += log_prob;
            }
        }

        Ok(jll)
    }
}

impl Classifier for CategoricalNaiveBayes {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureRecord) -> Result<String, ClassifierError> {
        let jll = self.joint_log_likelihood(features)?;
        let best = argmax(&jll).unwrap_or(0);
        Ok(self.params.classes[best].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> CategoricalNaiveBayes {
        let params: NaiveBayesParams = serde_json::from_value(json!({
            "classes": ["Sunscreen", "Serum"],
            "class_log_prior": [-0.69, -0.69],
            "feature_log_prob": {
                "skin_tone": {
                    "Fair": [-0.2, -1.8],
                    "Dark": [-1.8, -0.2]
                }
            }
        }))
        .unwrap();
        CategoricalNaiveBayes::new("naive_bayes", params).unwrap()
    }

    #[test]
    fn test_predicts_most_likely_class() {
        let nb = model();
        assert_eq!(nb.predict(&FeatureRecord::new().with("skin_tone", "Fair")).unwrap(), "Sunscreen");
        assert_eq!(nb.predict(&FeatureRecord::new().with("skin_tone", "Dark")).unwrap(), "Serum");
    }

    #[test]
    fn test_unseen_value_is_an_error() {
        let err = model()
            .predict(&FeatureRecord::new().with("skin_tone", "Olive"))
            .unwrap_err();
        assert!(matches!(err, ClassifierError::UnknownCategory { ref value, .. } if value == "Olive"));
    }

    #[test]
    fn test_prior_length_checked() {
        let params = NaiveBayesParams {
            classes: vec!["A".into(), "B".into()],
            class_log_prior: vec![-0.1],
            feature_log_prob: BTreeMap::new(),
        };
        assert!(matches!(
            CategoricalNaiveBayes::new("nb", params),
            Err(ClassifierError::Malformed { .. })
        ));
    }
}
