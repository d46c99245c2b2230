//! Player statistics and their fixed-layout numeric encoding
//!
//! This module turns aggregated per-player telemetry into the 23-element
//! feature vectors consumed by the skill model.

pub mod aggregate;
pub mod encoder;
pub mod rank;

// Re-export commonly used types
pub use aggregate::{aggregate, MatchRecord, RankedProfile};
pub use encoder::{encode, FeatureVector, PlayerStatisticsRecord, FEATURE_LEN};
pub use rank::{ladder_score, Tier};
