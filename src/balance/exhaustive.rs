//! Exact balanced partition by exhaustive search
//!
//! Enumerates every choice of `floor(n/2)` players for team A in
//! lexicographic index order (players indexed by sorted id) and keeps the
//! first split with the smallest absolute skill difference. Later splits that
//! only tie the current best are ignored.
//!
//! Cost is `C(n, n/2)` candidates at `O(n)` each, which is fine for
//! team-game rosters (n <= 14) and infeasible well beyond that.

use crate::balance::{build_split, roster_entries, TeamBalancer};
use crate::error::Result;
use crate::types::{Roster, TeamSplit};
use crate::utils::{score_difference, team_sizes};
use tracing::debug;

/// Exhaustive balancer, globally optimal for the minimal-difference objective
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveBalancer;

impl TeamBalancer for ExhaustiveBalancer {
    fn split(&self, roster: &Roster) -> Result<TeamSplit> {
        balance(roster)
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}

/// Split a roster into two teams with minimal total-skill difference
pub fn balance(roster: &Roster) -> Result<TeamSplit> {
    let (ids, skills) = roster_entries(roster)?;
    let n = ids.len();
    let (team_a_size, _) = team_sizes(n);

    let mut indices: Vec<usize> = (0..team_a_size).collect();
    let mut in_team_a = vec![false; n];
    let mut best_diff = f64::INFINITY;
    let mut best_mask = vec![false; n];
    let mut evaluated = 0u64;

    loop {
        in_team_a.iter_mut().for_each(|slot| *slot = false);
        for &index in &indices {
            in_team_a[index] = true;
        }

        let (mut sum_a, mut sum_b) = (0.0, 0.0);
        for (&skill, &in_a) in skills.iter().zip(&in_team_a) {
            if in_a {
                sum_a += skill;
            } else {
                sum_b += skill;
            }
        }
        evaluated += 1;

        let diff = score_difference(sum_a, sum_b);
        if diff < best_diff {
            best_diff = diff;
            best_mask.copy_from_slice(&in_team_a);
        }

        if !next_combination(&mut indices, n) {
            break;
        }
    }

    debug!(
        "Exhaustive search over {} players evaluated {} splits, best difference {}",
        n, evaluated, best_diff
    );
    Ok(build_split(&ids, &skills, &best_mask))
}

/// Advance `indices` to the next k-combination of `0..n` in lexicographic
/// order. Returns false once the last combination has been passed.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut position = k;
    while position > 0 {
        position -= 1;
        if indices[position] != position + n - k {
            indices[position] += 1;
            for next in position + 1..k {
                indices[next] = indices[next - 1] + 1;
            }
            return true;
        }
    }
    false
}
