//! Team Balancer - learned skill scores and balanced two-team splits
//!
//! This crate encodes per-player ranked statistics into fixed-layout feature
//! vectors, learns a comparable skill score from them with gradient-boosted
//! regression trees, and splits a scored roster into two teams with minimal
//! total-skill difference.

pub mod balance;
pub mod config;
pub mod error;
pub mod features;
pub mod report;
pub mod skill;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{BalancerError, Result};
pub use types::*;

// Re-export key components
pub use balance::{balance, select_balancer, TeamBalancer};
pub use features::{encode, FeatureVector, PlayerStatisticsRecord};
pub use skill::{predict, train, SkillEstimator, SkillModel, TrainingExample};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
