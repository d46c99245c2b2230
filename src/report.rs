//! Serializable summaries of a team split
//!
//! Besides the raw totals, a report carries team A's expected score against
//! team B under the Weng-Lin two-team model, treating each skill score as a
//! rating with a shared uncertainty.

use crate::types::{PlayerId, Roster, TeamSplit};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillratings::weng_lin::{expected_score_two_teams, WengLinConfig, WengLinRating};

/// One player's line in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub player_id: PlayerId,
    pub skill: f64,
}

/// Complete summary of a split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    pub strategy: String,
    pub team_a: Vec<ReportEntry>,
    pub team_b: Vec<ReportEntry>,
    pub sum_a: f64,
    pub sum_b: f64,
    pub difference: f64,
    /// Team A's expected score; absent when either team is empty
    pub expected_score_a: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

/// Parameters for the win expectation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectationParams {
    pub beta: f64,
    pub uncertainty: f64,
}

impl Default for ExpectationParams {
    fn default() -> Self {
        Self {
            beta: 200.0,
            uncertainty: 200.0,
        }
    }
}

impl SplitReport {
    /// Build a report for `split`, looking skills up in `roster`
    pub fn new(
        strategy: &str,
        roster: &Roster,
        split: &TeamSplit,
        params: ExpectationParams,
    ) -> Self {
        let entries = |team: &[PlayerId]| -> Vec<ReportEntry> {
            team.iter()
                .map(|player_id| ReportEntry {
                    player_id: player_id.clone(),
                    skill: roster.get(player_id).copied().unwrap_or_default(),
                })
                .collect()
        };

        let team_a = entries(&split.team_a);
        let team_b = entries(&split.team_b);
        let expected_score_a = expected_score(&team_a, &team_b, params);

        Self {
            strategy: strategy.to_string(),
            team_a,
            team_b,
            sum_a: split.sum_a,
            sum_b: split.sum_b,
            difference: split.difference(),
            expected_score_a,
            generated_at: current_timestamp(),
        }
    }
}

/// Weng-Lin expected score of `team_a` against `team_b`
pub fn expected_score(
    team_a: &[ReportEntry],
    team_b: &[ReportEntry],
    params: ExpectationParams,
) -> Option<f64> {
    if team_a.is_empty() || team_b.is_empty() {
        return None;
    }

    let to_ratings = |team: &[ReportEntry]| -> Vec<WengLinRating> {
        team.iter()
            .map(|entry| WengLinRating {
                rating: entry.skill,
                uncertainty: params.uncertainty,
            })
            .collect()
    };
    let config = WengLinConfig {
        beta: params.beta,
        uncertainty_tolerance: 0.0001,
    };

    let (score_a, _score_b) =
        expected_score_two_teams(&to_ratings(team_a), &to_ratings(team_b), &config);
    Some(score_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::balance;

    fn sample_roster() -> Roster {
        [("A", 10.0), ("B", 20.0), ("C", 15.0), ("D", 5.0)]
            .iter()
            .map(|(id, skill)| (id.to_string(), *skill))
            .collect()
    }

    #[test]
    fn test_report_for_even_split() {
        let roster = sample_roster();
        let split = balance(&roster).unwrap();
        let report = SplitReport::new("exhaustive", &roster, &split, ExpectationParams::default());

        assert_eq!(report.team_a.len(), 2);
        assert_eq!(report.team_a[0].player_id, "A");
        assert_eq!(report.team_a[0].skill, 10.0);
        assert_eq!(report.difference, 0.0);

        let expected = report.expected_score_a.unwrap();
        assert!((expected - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stronger_team_is_favoured() {
        let strong = vec![ReportEntry {
            player_id: "s".to_string(),
            skill: 1800.0,
        }];
        let weak = vec![ReportEntry {
            player_id: "w".to_string(),
            skill: 1200.0,
        }];

        let expected = expected_score(&strong, &weak, ExpectationParams::default()).unwrap();
        assert!(expected > 0.5);
    }

    #[test]
    fn test_single_player_report_has_no_expectation() {
        let roster: Roster = [("X".to_string(), 7.0)].into_iter().collect();
        let split = balance(&roster).unwrap();
        let report = SplitReport::new("exhaustive", &roster, &split, ExpectationParams::default());

        assert!(report.team_a.is_empty());
        assert_eq!(report.expected_score_a, None);
        assert_eq!(report.difference, 7.0);
    }

    #[test]
    fn test_report_serializes() {
        let roster = sample_roster();
        let split = balance(&roster).unwrap();
        let report = SplitReport::new("exhaustive", &roster, &split, ExpectationParams::default());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["strategy"], "exhaustive");
        assert_eq!(json["team_b"][0]["player_id"], "B");
    }
}
