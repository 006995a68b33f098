//! # Recommendation Orchestrator
//!
//! The read-only context built once at startup and shared by every request:
//! 1. Load the catalog and the classifiers (in parallel)
//! 2. Turn a completed profile into a feature row
//! 3. Predict a category with the ensemble
//! 4. Select the top products for that category
//! 5. Compose the reply
//!
//! Missing artifacts never abort startup. A missing catalog turns every
//! recommendation into the data-unavailable reply; missing classifiers
//! shrink the ensemble down to the default category.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use catalog::Catalog;
use conversation::{Profile, Recommender};
use pipeline::{RecommendationSelector, Selection};
use predictor::{Ensemble, FeatureRecord, Prediction};

use crate::config::ServerConfig;
use crate::replies;

/// Prediction plus the products picked for it
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub prediction: Prediction,
    pub selection: Selection,
}

pub struct RecommendationOrchestrator {
    catalog: Option<Arc<Catalog>>,
    ensemble: Ensemble,
    selector: RecommendationSelector,
}

impl RecommendationOrchestrator {
    pub fn new(
        catalog: Option<Arc<Catalog>>,
        ensemble: Ensemble,
        selector: RecommendationSelector,
    ) -> Self {
        Self {
            catalog,
            ensemble,
            selector,
        }
    }

    /// Load every startup artifact named by `config`.
    ///
    /// Blocks while reading files; call it from a blocking context.
    pub fn load(config: &ServerConfig) -> Self {
        let start_time = Instant::now();

        let (catalog, ensemble) = rayon::join(
            || Catalog::load_from_file(&config.catalog_path),
            || Ensemble::load_from_dir(&config.models_dir),
        );

        let catalog = match catalog {
            Ok(catalog) => Some(Arc::new(catalog)),
            Err(e) => {
                warn!("Catalog unavailable, recommendations disabled: {}", e);
                None
            }
        };

        info!(
            "Artifacts loaded in {:.2?} (catalog: {}, classifiers: {})",
            start_time.elapsed(),
            catalog.is_some(),
            ensemble.len()
        );

        Self::new(
            catalog,
            ensemble,
            RecommendationSelector::new(config.recommendation_limit),
        )
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    /// Single feature row for the classifiers
    pub fn features(profile: &Profile) -> FeatureRecord {
        profile
            .pairs()
            .into_iter()
            .fold(FeatureRecord::new(), |record, (key, value)| record.with(key, value))
    }

    pub fn predict(&self, profile: &Profile) -> Prediction {
        self.ensemble.predict(&Self::features(profile))
    }

    /// Predict a category and pick its products
    pub fn recommend_profile(&self, profile: &Profile) -> Result<Recommendation> {
        let start_time = Instant::now();

        let prediction = self.predict(profile);
        info!(
            "Predicted category {} from {} votes (fallback: {})",
            prediction.category,
            prediction.votes.len(),
            prediction.fallback
        );

        let selection = self
            .selector
            .select(self.catalog(), &prediction.category)
            .context("Failed to select products")?;
        info!(
            "Selected {} products in {:.2?}",
            selection.products().len(),
            start_time.elapsed()
        );

        Ok(Recommendation {
            prediction,
            selection,
        })
    }
}

impl Recommender for RecommendationOrchestrator {
    fn recommend(&self, profile: &Profile) -> String {
        match self.recommend_profile(profile) {
            Ok(recommendation) => replies::compose(&recommendation.selection),
            Err(e) => {
                error!("Recommendation failed: {:#}", e);
                replies::compose(&Selection::CatalogUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Product;
    use predictor::{Classifier, ClassifierError};
    use std::fs;

    struct Fixed(&'static str);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &FeatureRecord) -> Result<String, ClassifierError> {
            Ok(self.0.to_string())
        }
    }

    fn profile() -> Profile {
        Profile::parse("Oily", "Fair", "Black", "Brown").unwrap()
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_products(vec![
            Product::new("Hydra Gel", "Moisturizer", Some(4.8), "https://shop.example/a"),
            Product::new("Night Balm", "Moisturizer", Some(4.8), "https://shop.example/b"),
            Product::new("Cloud Cream", "Moisturizer", Some(4.5), "https://shop.example/c"),
            Product::new("Dew Drops", "Moisturizer", Some(4.2), "https://shop.example/d"),
            Product::new("Barrier Lotion", "Moisturizer", Some(3.9), "https://shop.example/e"),
        ]))
    }

    #[test]
    fn test_features_follow_question_order() {
        let record = RecommendationOrchestrator::features(&profile());
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["skin_type", "skin_tone", "hair_color", "eye_color"]);
        assert_eq!(record.get("hair_color"), Some("Black"));
    }

    #[test]
    fn test_oily_fair_black_brown_scenario() {
        let orchestrator = RecommendationOrchestrator::new(
            Some(catalog()),
            Ensemble::new().with_classifier(Fixed("Moisturizer")),
            RecommendationSelector::default(),
        );

        let recommendation = orchestrator.recommend_profile(&profile()).unwrap();
        assert_eq!(recommendation.prediction.category, "Moisturizer");
        let names: Vec<&str> = recommendation
            .selection
            .products()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Hydra Gel", "Night Balm", "Cloud Cream"]);

        let reply = orchestrator.recommend(&profile());
        assert_eq!(reply.matches("View Product").count(), 3);
        assert!(!reply.contains("Dew Drops"));
    }

    #[test]
    fn test_empty_ensemble_uses_default_category() {
        let orchestrator =
            RecommendationOrchestrator::new(Some(catalog()), Ensemble::new(), RecommendationSelector::default());

        let recommendation = orchestrator.recommend_profile(&profile()).unwrap();
        assert!(recommendation.prediction.fallback);
        assert_eq!(
            recommendation.selection,
            Selection::NoMatches {
                category: predictor::DEFAULT_CATEGORY.to_string()
            }
        );
        assert!(orchestrator.recommend(&profile()).contains("<b>General Skincare</b>"));
    }

    #[test]
    fn test_missing_catalog_always_unavailable() {
        let orchestrator = RecommendationOrchestrator::new(
            None,
            Ensemble::new().with_classifier(Fixed("Moisturizer")),
            RecommendationSelector::default(),
        );

        let reply = orchestrator.recommend(&profile());
        assert!(reply.ends_with(&replies::data_unavailable()));
    }

    #[test]
    fn test_load_degrades_on_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            catalog_path: dir.path().join("missing.csv"),
            models_dir: dir.path().join("models"),
            ..ServerConfig::default()
        };

        let orchestrator = RecommendationOrchestrator::load(&config);
        assert!(orchestrator.catalog().is_none());
        assert!(orchestrator.ensemble().is_empty());
    }

    #[test]
    fn test_load_reads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("products.csv");
        fs::write(
            &catalog_path,
            "product_name,Category,Rating_Stars,Product_Url\nGel,Cleanser,4.1,https://shop.example/gel\n",
        )
        .unwrap();

        let config = ServerConfig {
            catalog_path,
            models_dir: dir.path().to_path_buf(),
            recommendation_limit: 1,
            ..ServerConfig::default()
        };

        let orchestrator = RecommendationOrchestrator::load(&config);
        assert_eq!(orchestrator.catalog().map(Catalog::len), Some(1));
    }
}
