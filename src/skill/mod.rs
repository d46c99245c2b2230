//! Skill estimation using gradient-boosted regression trees
//!
//! This module provides the weak learner, the boosting loop, and the
//! [`SkillModel`] wrapper that maps encoded player statistics to a single
//! comparable skill score.

pub mod gbdt;
pub mod label;
pub mod model;
pub mod tree;

// Re-export commonly used types
pub use gbdt::{Ensemble, GradientBoostingConfig};
pub use label::proxy_label;
pub use model::{
    predict, score_roster, train, train_with_config, SkillEstimator, SkillInput, SkillModel,
    TrainingExample,
};
pub use tree::{RegressionTree, TreeParams};
