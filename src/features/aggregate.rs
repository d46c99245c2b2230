//! Per-player aggregation of recent match telemetry
//!
//! Reduces a ranked profile, a list of per-match records and a mastery list
//! into one [`PlayerStatisticsRecord`]. Missing match history defaults every
//! averaged field and the lane distribution to zero; that defaulting lives
//! here and never inside the encoder.

use crate::features::encoder::{PlayerStatisticsRecord, LANE_SLOTS, MASTERY_SLOTS};
use crate::features::rank::{division_from_roman, Tier};
use crate::types::Lane;
use crate::utils::mean;
use serde::{Deserialize, Serialize};

/// Ranked ladder state and account information for a player
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedProfile {
    pub tier: u8,
    pub division: u8,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
    pub account_level: u32,
}

impl RankedProfile {
    /// Build a profile from the provider's textual tier and division
    pub fn from_entry(
        tier: &str,
        division: &str,
        league_points: u32,
        wins: u32,
        losses: u32,
        account_level: u32,
    ) -> Self {
        Self {
            tier: Tier::parse(tier).ordinal(),
            division: division_from_roman(division),
            league_points,
            wins,
            losses,
            account_level,
        }
    }

    /// Fraction of ranked games won, 0.0 with no games played
    pub fn win_rate(&self) -> f64 {
        let total = f64::from(self.wins) + f64::from(self.losses);
        if total == 0.0 {
            0.0
        } else {
            f64::from(self.wins) / total
        }
    }
}

/// Statistics for one player in one recent match
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchRecord {
    pub kda: f64,
    pub cs_per_min: f64,
    pub gold_per_min: f64,
    pub vision_score_per_min: f64,
    pub damage_per_min: f64,
    pub kill_participation: f64,
    pub team_damage_share: f64,
    /// Team baron plus dragon kills
    pub objectives: f64,
    pub takedowns_first_25: f64,
    pub solo_kills: f64,
    pub lane: Option<Lane>,
    pub win: bool,
}

/// (kills + assists) / max(1, deaths)
pub fn kda(kills: u32, assists: u32, deaths: u32) -> f64 {
    (f64::from(kills) + f64::from(assists)) / f64::from(deaths.max(1))
}

/// Aggregate one player's telemetry into a statistics record.
///
/// `mastery_points` is expected in descending order; the first three entries
/// are kept and the rest zero-padded.
pub fn aggregate(
    profile: &RankedProfile,
    matches: &[MatchRecord],
    mastery_points: &[u32],
) -> PlayerStatisticsRecord {
    PlayerStatisticsRecord {
        tier: profile.tier,
        division: profile.division,
        league_points: profile.league_points,
        win_rate: profile.win_rate(),
        account_level: profile.account_level,
        avg_kda: average(matches, |m| m.kda),
        cs_per_min: average(matches, |m| m.cs_per_min),
        gold_per_min: average(matches, |m| m.gold_per_min),
        vision_score_per_min: average(matches, |m| m.vision_score_per_min),
        damage_per_min: average(matches, |m| m.damage_per_min),
        kill_participation: average(matches, |m| m.kill_participation),
        team_damage_share: average(matches, |m| m.team_damage_share),
        objective_rate: average(matches, |m| m.objectives),
        takedowns_first_25: average(matches, |m| m.takedowns_first_25),
        solo_kills: average(matches, |m| m.solo_kills),
        top_mastery_scores: top_mastery(mastery_points),
        lane_distribution: lane_distribution(matches),
    }
}

fn average<F>(matches: &[MatchRecord], stat: F) -> f64
where
    F: Fn(&MatchRecord) -> f64,
{
    let values: Vec<f64> = matches.iter().map(stat).collect();
    mean(&values)
}

/// First three mastery totals, zero-padded
pub fn top_mastery(mastery_points: &[u32]) -> Vec<u32> {
    let mut scores: Vec<u32> = mastery_points.iter().take(MASTERY_SLOTS).copied().collect();
    scores.resize(MASTERY_SLOTS, 0);
    scores
}

/// Share of matches played in each canonical lane.
///
/// Matches without a recognised lane still count towards the denominator.
pub fn lane_distribution(matches: &[MatchRecord]) -> Vec<f64> {
    let mut counts = [0usize; LANE_SLOTS];
    for lane in matches.iter().filter_map(|m| m.lane) {
        counts[lane.index()] += 1;
    }

    if matches.is_empty() {
        return vec![0.0; LANE_SLOTS];
    }
    let total = matches.len() as f64;
    counts.iter().map(|&count| count as f64 / total).collect()
}
