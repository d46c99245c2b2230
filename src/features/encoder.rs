//! Fixed-layout feature vector encoding
//!
//! The layout is 15 scalar fields, then the 3 top mastery scores, then the
//! 5 lane-distribution entries. Skill model weights are only meaningful under
//! this exact order.

use crate::error::{BalancerError, Result};
use crate::types::Lane;
use serde::{Deserialize, Serialize};

/// Number of scalar statistics at the front of the vector
pub const SCALAR_FEATURES: usize = 15;

/// Number of top champion mastery scores
pub const MASTERY_SLOTS: usize = 3;

/// Number of lane-distribution entries
pub const LANE_SLOTS: usize = Lane::ALL.len();

/// Total encoded length
pub const FEATURE_LEN: usize = SCALAR_FEATURES + MASTERY_SLOTS + LANE_SLOTS;

/// Names of every encoded position, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_LEN] = [
    "tier",
    "division",
    "league_points",
    "win_rate",
    "account_level",
    "avg_kda",
    "cs_per_min",
    "gold_per_min",
    "vision_score_per_min",
    "damage_per_min",
    "kill_participation",
    "team_damage_share",
    "objective_rate",
    "takedowns_first_25",
    "solo_kills",
    "mastery_1",
    "mastery_2",
    "mastery_3",
    "lane_top",
    "lane_jungle",
    "lane_middle",
    "lane_bottom",
    "lane_utility",
];

/// Aggregated per-player statistics, the encoder's input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStatisticsRecord {
    /// Rank tier ordinal, 0 = unranked through 10 = highest
    pub tier: u8,
    /// Division within the tier, 0 = none
    pub division: u8,
    pub league_points: u32,
    pub win_rate: f64,
    pub account_level: u32,
    pub avg_kda: f64,
    pub cs_per_min: f64,
    pub gold_per_min: f64,
    pub vision_score_per_min: f64,
    pub damage_per_min: f64,
    pub kill_participation: f64,
    pub team_damage_share: f64,
    pub objective_rate: f64,
    pub takedowns_first_25: f64,
    pub solo_kills: f64,
    /// Exactly three entries, zero-padded
    pub top_mastery_scores: Vec<u32>,
    /// Exactly five entries in canonical lane order
    pub lane_distribution: Vec<f64>,
}

impl PlayerStatisticsRecord {
    /// Check the fixed-length sequence invariants
    pub fn validate(&self) -> Result<()> {
        if self.top_mastery_scores.len() != MASTERY_SLOTS {
            return Err(BalancerError::length_mismatch(
                "top_mastery_scores",
                MASTERY_SLOTS,
                self.top_mastery_scores.len(),
            )
            .into());
        }
        if self.lane_distribution.len() != LANE_SLOTS {
            return Err(BalancerError::length_mismatch(
                "lane_distribution",
                LANE_SLOTS,
                self.lane_distribution.len(),
            )
            .into());
        }
        Ok(())
    }
}

/// Encoded, fixed-length numeric representation of a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Wrap raw values, checking the length
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.len() != FEATURE_LEN {
            return Err(
                BalancerError::length_mismatch("feature vector", FEATURE_LEN, values.len()).into(),
            );
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Encode a statistics record into its feature vector
pub fn encode(record: &PlayerStatisticsRecord) -> Result<FeatureVector> {
    record.validate()?;

    let mut values = Vec::with_capacity(FEATURE_LEN);
    values.extend_from_slice(&[
        f64::from(record.tier),
        f64::from(record.division),
        f64::from(record.league_points),
        record.win_rate,
        f64::from(record.account_level),
        record.avg_kda,
        record.cs_per_min,
        record.gold_per_min,
        record.vision_score_per_min,
        record.damage_per_min,
        record.kill_participation,
        record.team_damage_share,
        record.objective_rate,
        record.takedowns_first_25,
        record.solo_kills,
    ]);
    values.extend(record.top_mastery_scores.iter().map(|&points| f64::from(points)));
    values.extend_from_slice(&record.lane_distribution);

    Ok(FeatureVector(values))
}
