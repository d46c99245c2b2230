//! Gradient-boosted regression trees with squared-error loss
//!
//! Each stage fits a [`RegressionTree`] to the residuals of the ensemble
//! built so far and adds it scaled by the learning rate. Feature visiting
//! order is shuffled per stage from a seeded PCG generator, so identical
//! input yields a bit-identical ensemble.

use crate::error::{BalancerError, Result};
use crate::skill::tree::{RegressionTree, TreeParams};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Boosting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingConfig {
    /// Number of boosting stages
    pub n_estimators: usize,
    /// Shrinkage applied to every tree's output
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Seed for the feature-order generator
    pub seed: u64,
}

impl Default for GradientBoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 0,
        }
    }
}

impl GradientBoostingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(BalancerError::ConfigurationError {
                message: "Number of estimators must be greater than 0".to_string(),
            }
            .into());
        }

        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(BalancerError::ConfigurationError {
                message: "Learning rate must be positive".to_string(),
            }
            .into());
        }

        if self.min_samples_split < 2 {
            return Err(BalancerError::ConfigurationError {
                message: "Minimum samples per split must be at least 2".to_string(),
            }
            .into());
        }

        if self.min_samples_leaf == 0 {
            return Err(BalancerError::ConfigurationError {
                message: "Minimum samples per leaf must be at least 1".to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
        }
    }
}

/// Fitted additive ensemble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    /// Expected input length
    pub n_features: usize,
    /// Initial prediction (mean label)
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

impl Ensemble {
    /// Fit an ensemble. `rows` must be non-empty and rectangular.
    pub fn fit(rows: &[Vec<f64>], labels: &[f64], config: &GradientBoostingConfig) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let init = labels.iter().sum::<f64>() / labels.len() as f64;
        let params = config.tree_params();

        let mut rng = Pcg64Mcg::seed_from_u64(config.seed);
        let mut feature_order: Vec<usize> = (0..n_features).collect();
        let mut predictions = vec![init; rows.len()];
        let mut trees = Vec::with_capacity(config.n_estimators);

        for stage in 0..config.n_estimators {
            let residuals: Vec<f64> = labels
                .iter()
                .zip(&predictions)
                .map(|(label, prediction)| label - prediction)
                .collect();

            feature_order.shuffle(&mut rng);
            let tree = RegressionTree::fit(rows, &residuals, &feature_order, params);

            for (prediction, row) in predictions.iter_mut().zip(rows) {
                *prediction += config.learning_rate * tree.predict(row);
            }

            if stage % 10 == 0 {
                debug!(
                    "Boosting stage {}: {} leaves, training RMSE {:.6}",
                    stage,
                    tree.leaf_count(),
                    rmse(labels, &predictions)
                );
            }
            trees.push(tree);
        }

        info!(
            "Fitted {} boosting stages on {} examples (training RMSE {:.6})",
            trees.len(),
            rows.len(),
            rmse(labels, &predictions)
        );

        Self {
            n_features,
            init,
            learning_rate: config.learning_rate,
            trees,
        }
    }

    /// Ensemble output for one row of length `n_features`
    pub(crate) fn predict(&self, row: &[f64]) -> f64 {
        let boost: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        self.init + self.learning_rate * boost
    }
}

/// Root mean squared error between labels and predictions
pub fn rmse(labels: &[f64], predictions: &[f64]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let sse: f64 = labels
        .iter()
        .zip(predictions)
        .map(|(label, prediction)| (label - prediction).powi(2))
        .sum();
    (sse / labels.len() as f64).sqrt()
}
