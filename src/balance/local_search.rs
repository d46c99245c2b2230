//! Greedy seeding plus swap local search for rosters too large to enumerate
//!
//! Players are dealt in descending skill order to whichever team currently
//! has the lower total and still has room. Best-improvement single swaps then
//! run until no swap narrows the gap or the pass limit is reached. The result
//! is not guaranteed optimal.

use crate::balance::{build_split, roster_entries, TeamBalancer};
use crate::error::Result;
use crate::types::{Roster, TeamSplit};
use crate::utils::team_sizes;
use tracing::debug;

/// Heuristic balancer bounded by a number of swap passes
#[derive(Debug, Clone, Copy)]
pub struct LocalSearchBalancer {
    max_swap_passes: usize,
}

impl LocalSearchBalancer {
    pub fn new(max_swap_passes: usize) -> Self {
        Self { max_swap_passes }
    }
}

impl Default for LocalSearchBalancer {
    fn default() -> Self {
        Self::new(100)
    }
}

impl TeamBalancer for LocalSearchBalancer {
    fn split(&self, roster: &Roster) -> Result<TeamSplit> {
        let (ids, skills) = roster_entries(roster)?;
        let n = ids.len();
        let (capacity_a, capacity_b) = team_sizes(n);

        // Descending skill; the stable sort keeps id order among equal skills
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| skills[b].total_cmp(&skills[a]));

        let mut in_team_a = vec![false; n];
        let (mut count_a, mut count_b) = (0, 0);
        let (mut sum_a, mut sum_b) = (0.0, 0.0);
        for index in order {
            let to_a = count_b == capacity_b || (count_a < capacity_a && sum_a <= sum_b);
            if to_a {
                in_team_a[index] = true;
                count_a += 1;
                sum_a += skills[index];
            } else {
                count_b += 1;
                sum_b += skills[index];
            }
        }

        let mut passes = 0;
        while passes < self.max_swap_passes {
            let gap = sum_a - sum_b;
            let mut best: Option<(usize, usize, f64)> = None;

            for a in (0..n).filter(|&i| in_team_a[i]) {
                for b in (0..n).filter(|&i| !in_team_a[i]) {
                    let new_gap = (gap - 2.0 * (skills[a] - skills[b])).abs();
                    if new_gap < best.map_or(gap.abs(), |(_, _, g)| g) {
                        best = Some((a, b, new_gap));
                    }
                }
            }

            let Some((a, b, _)) = best else {
                break;
            };
            in_team_a[a] = false;
            in_team_a[b] = true;
            sum_a += skills[b] - skills[a];
            sum_b += skills[a] - skills[b];
            passes += 1;
        }

        debug!(
            "Local search over {} players finished after {} swap passes",
            n, passes
        );
        Ok(build_split(&ids, &skills, &in_team_a))
    }

    fn name(&self) -> &'static str {
        "local_search"
    }
}
