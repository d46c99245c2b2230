//! Common types used throughout the balancer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique, stable identifier for a player
pub type PlayerId = String;

/// Mapping from player to scalar skill score.
///
/// A `BTreeMap` iterates in lexicographic identifier order, which is the
/// enumeration order every balancer in this crate relies on.
pub type Roster = BTreeMap<PlayerId, f64>;

/// Role a player occupied in a match, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Lane {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
}

impl Lane {
    /// Every lane in canonical order
    pub const ALL: [Lane; 5] = [
        Lane::Top,
        Lane::Jungle,
        Lane::Middle,
        Lane::Bottom,
        Lane::Utility,
    ];

    /// Position of this lane in the canonical order
    pub fn index(self) -> usize {
        match self {
            Lane::Top => 0,
            Lane::Jungle => 1,
            Lane::Middle => 2,
            Lane::Bottom => 3,
            Lane::Utility => 4,
        }
    }

    /// Parse a telemetry lane label. Unknown or empty labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "TOP" => Some(Lane::Top),
            "JUNGLE" => Some(Lane::Jungle),
            "MIDDLE" | "MID" => Some(Lane::Middle),
            "BOTTOM" | "BOT" => Some(Lane::Bottom),
            "UTILITY" | "SUPPORT" => Some(Lane::Utility),
            _ => None,
        }
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lane::Top => write!(f, "TOP"),
            Lane::Jungle => write!(f, "JUNGLE"),
            Lane::Middle => write!(f, "MIDDLE"),
            Lane::Bottom => write!(f, "BOTTOM"),
            Lane::Utility => write!(f, "UTILITY"),
        }
    }
}

/// Two disjoint, exhaustive teams drawn from a roster.
///
/// `team_a` holds `floor(n/2)` players and `team_b` holds `ceil(n/2)`. Members
/// are listed in roster enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub sum_a: f64,
    pub sum_b: f64,
}

impl TeamSplit {
    /// Absolute difference of summed skill between the two teams
    pub fn difference(&self) -> f64 {
        crate::utils::score_difference(self.sum_a, self.sum_b)
    }

    /// Total number of players across both teams
    pub fn len(&self) -> usize {
        self.team_a.len() + self.team_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
