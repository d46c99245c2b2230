//! Heuristic proxy labels for bootstrapping a training set
//!
//! When no ground-truth skill value exists, a player's own ladder position
//! (weighted double), the average ladder position of the players they were
//! recently matched with, and their deepest champion mastery are combined
//! into a single label.

use crate::features::encoder::PlayerStatisticsRecord;
use crate::features::rank::ladder_score;

/// Mastery points per label point
const MASTERY_DIVISOR: f64 = 1000.0;

/// Proxy skill label: `2 * own ladder score + opponent average + top mastery / 1000`
pub fn proxy_label(record: &PlayerStatisticsRecord, avg_match_ladder_score: f64) -> f64 {
    let own = ladder_score(record.tier, record.division, record.league_points);
    let top_mastery = f64::from(record.top_mastery_scores.first().copied().unwrap_or(0));

    own * 2.0 + avg_match_ladder_score + (top_mastery / MASTERY_DIVISOR).floor()
}
