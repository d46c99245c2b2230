//! Test fixtures shared by the integration tests
#![allow(dead_code)]

use team_balancer::features::{aggregate, MatchRecord, PlayerStatisticsRecord, RankedProfile};
use team_balancer::skill::proxy_label;
use team_balancer::{Lane, PlayerId, Roster, TrainingExample};

/// Realistic players: (id, tier, division, lp, wins, losses, level, kda, cs/min, lane)
const TEST_PLAYERS: [(&str, &str, &str, u32, u32, u32, u32, f64, f64, Lane); 10] = [
    ("challenger_mid", "CHALLENGER", "I", 850, 180, 120, 540, 5.1, 9.2, Lane::Middle),
    ("diamond_jungle", "DIAMOND", "II", 40, 90, 80, 320, 3.9, 6.1, Lane::Jungle),
    ("emerald_top", "EMERALD", "IV", 10, 60, 58, 210, 3.1, 7.4, Lane::Top),
    ("platinum_bot", "PLATINUM", "I", 75, 55, 50, 180, 3.4, 8.0, Lane::Bottom),
    ("gold_support", "GOLD", "III", 20, 40, 45, 150, 2.8, 1.4, Lane::Utility),
    ("silver_mid", "SILVER", "II", 60, 30, 35, 95, 2.2, 5.9, Lane::Middle),
    ("bronze_top", "BRONZE", "I", 5, 25, 30, 70, 1.7, 5.2, Lane::Top),
    ("iron_jungle", "IRON", "III", 90, 10, 20, 45, 1.2, 4.0, Lane::Jungle),
    ("smurf_unranked", "", "", 0, 0, 0, 32, 6.0, 9.0, Lane::Middle),
    ("fresh_account", "", "", 0, 0, 0, 31, 1.0, 3.5, Lane::Utility),
];

/// Build a statistics record through the aggregator
pub fn player_record(
    tier: &str,
    division: &str,
    league_points: u32,
    wins: u32,
    losses: u32,
    level: u32,
    kda: f64,
    cs_per_min: f64,
    lane: Lane,
) -> PlayerStatisticsRecord {
    let profile = RankedProfile::from_entry(tier, division, league_points, wins, losses, level);
    let matches: Vec<MatchRecord> = (0..10)
        .map(|game| MatchRecord {
            kda: kda + (game % 3) as f64 * 0.1,
            cs_per_min,
            gold_per_min: 250.0 + cs_per_min * 20.0,
            vision_score_per_min: 0.8,
            damage_per_min: 300.0 + kda * 80.0,
            kill_participation: 0.5,
            team_damage_share: 0.2,
            objectives: 1.0,
            takedowns_first_25: kda * 1.5,
            solo_kills: kda / 3.0,
            lane: Some(lane),
            win: game % 2 == 0,
        })
        .collect();
    let mastery = [level * 900, level * 400, level * 100];
    aggregate(&profile, &matches, &mastery)
}

/// All fixture players with their records
pub fn test_players() -> Vec<(PlayerId, PlayerStatisticsRecord)> {
    TEST_PLAYERS
        .iter()
        .map(
            |&(id, tier, division, lp, wins, losses, level, kda, cs, lane)| {
                (
                    id.to_string(),
                    player_record(tier, division, lp, wins, losses, level, kda, cs, lane),
                )
            },
        )
        .collect()
}

/// Training examples labelled with the proxy label
pub fn training_examples() -> Vec<TrainingExample> {
    test_players()
        .iter()
        .map(|(_, record)| {
            let label = proxy_label(record, 1200.0);
            TrainingExample::from_record(record, label).expect("fixture records are valid")
        })
        .collect()
}

/// Build a roster from (id, score) pairs
pub fn roster(entries: &[(&str, f64)]) -> Roster {
    entries
        .iter()
        .map(|(id, score)| (id.to_string(), *score))
        .collect()
}
