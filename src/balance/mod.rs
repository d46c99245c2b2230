//! Two-team balancing over a scored roster
//!
//! Every balancer walks the roster in lexicographic player-id order (the
//! iteration order of [`Roster`]) and returns teams of `floor(n/2)` and
//! `ceil(n/2)` players.

pub mod exhaustive;
pub mod local_search;

// Re-export commonly used types
pub use exhaustive::{balance, ExhaustiveBalancer};
pub use local_search::LocalSearchBalancer;

use crate::config::BalanceSettings;
use crate::error::{BalancerError, Result};
use crate::types::{PlayerId, Roster, TeamSplit};
use tracing::warn;

/// Trait for two-team balancing strategies
pub trait TeamBalancer: Send + Sync {
    /// Split the roster into two teams
    fn split(&self, roster: &Roster) -> Result<TeamSplit>;

    /// Short strategy name for logs and reports
    fn name(&self) -> &'static str;
}

/// Choose the exact search for small rosters and local search beyond the limit
pub fn select_balancer(settings: &BalanceSettings, roster_size: usize) -> Box<dyn TeamBalancer> {
    if roster_size <= settings.max_exhaustive_players {
        Box::new(ExhaustiveBalancer)
    } else {
        warn!(
            "Roster of {} players exceeds exhaustive limit {}, using local search",
            roster_size, settings.max_exhaustive_players
        );
        Box::new(LocalSearchBalancer::new(settings.max_swap_passes))
    }
}

/// Roster entries in enumeration order, rejecting empty rosters and
/// non-finite scores
pub(crate) fn roster_entries(roster: &Roster) -> Result<(Vec<&PlayerId>, Vec<f64>)> {
    if roster.is_empty() {
        return Err(BalancerError::EmptyRoster.into());
    }

    let mut ids = Vec::with_capacity(roster.len());
    let mut skills = Vec::with_capacity(roster.len());
    for (player_id, &skill) in roster {
        if !skill.is_finite() {
            return Err(BalancerError::Validation {
                field: format!("skill:{}", player_id),
                expected: "finite score".to_string(),
                actual: skill.to_string(),
            }
            .into());
        }
        ids.push(player_id);
        skills.push(skill);
    }
    Ok((ids, skills))
}

/// Assemble a split from a team-A membership mask
pub(crate) fn build_split(ids: &[&PlayerId], skills: &[f64], in_team_a: &[bool]) -> TeamSplit {
    let mut split = TeamSplit {
        team_a: Vec::new(),
        team_b: Vec::new(),
        sum_a: 0.0,
        sum_b: 0.0,
    };
    for ((&player_id, &skill), &in_a) in ids.iter().zip(skills).zip(in_team_a) {
        if in_a {
            split.team_a.push(player_id.clone());
            split.sum_a += skill;
        } else {
            split.team_b.push(player_id.clone());
            split.sum_b += skill;
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Roster {
        (0..n).map(|i| (format!("p{:02}", i), i as f64)).collect()
    }

    #[test]
    fn test_select_balancer_by_size() {
        let settings = BalanceSettings::default();
        assert_eq!(select_balancer(&settings, 10).name(), "exhaustive");
        assert_eq!(
            select_balancer(&settings, settings.max_exhaustive_players + 1).name(),
            "local_search"
        );
    }

    #[test]
    fn test_roster_entries_rejects_empty() {
        let err = roster_entries(&Roster::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BalancerError>(),
            Some(&BalancerError::EmptyRoster)
        );
    }

    #[test]
    fn test_roster_entries_rejects_nan() {
        let mut r = roster(3);
        r.insert("bad".to_string(), f64::NAN);
        assert!(roster_entries(&r).is_err());
    }

    #[test]
    fn test_build_split() {
        let r = roster(3);
        let (ids, skills) = roster_entries(&r).unwrap();
        let split = build_split(&ids, &skills, &[true, false, false]);

        assert_eq!(split.team_a, vec!["p00".to_string()]);
        assert_eq!(split.team_b, vec!["p01".to_string(), "p02".to_string()]);
        assert_eq!(split.sum_a, 0.0);
        assert_eq!(split.sum_b, 3.0);
    }
}
