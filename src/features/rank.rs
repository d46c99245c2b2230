//! Ranked tier and division helpers
//!
//! Converts the provider's textual rank (e.g. "GOLD" / "II") into the small
//! ordinals the encoder expects, and maps a full rank onto a single ladder
//! score so ranks can be averaged and compared.

use serde::{Deserialize, Serialize};

/// Ranked tier, ordered from unranked to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Unranked,
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    const ORDERED: [Tier; 11] = [
        Tier::Unranked,
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    /// Parse a tier name. Empty or unknown names are treated as unranked.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "IRON" => Tier::Iron,
            "BRONZE" => Tier::Bronze,
            "SILVER" => Tier::Silver,
            "GOLD" => Tier::Gold,
            "PLATINUM" => Tier::Platinum,
            "EMERALD" => Tier::Emerald,
            "DIAMOND" => Tier::Diamond,
            "MASTER" => Tier::Master,
            "GRANDMASTER" => Tier::Grandmaster,
            "CHALLENGER" => Tier::Challenger,
            _ => Tier::Unranked,
        }
    }

    /// Ordinal used in feature vectors, 0 (unranked) through 10
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ORDERED.get(usize::from(ordinal)).copied()
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Unranked => "UNRANKED",
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        };
        write!(f, "{}", name)
    }
}

/// Map a roman-numeral division to 1 ("IV") through 4 ("I"), 0 otherwise
pub fn division_from_roman(division: &str) -> u8 {
    match division.trim() {
        "IV" => 1,
        "III" => 2,
        "II" => 3,
        "I" => 4,
        _ => 0,
    }
}

/// Inverse of [`division_from_roman`]
pub fn division_to_roman(division: u8) -> Option<&'static str> {
    match division {
        1 => Some("IV"),
        2 => Some("III"),
        3 => Some("II"),
        4 => Some("I"),
        _ => None,
    }
}

/// Single comparable score for a full rank: 100 points per division step.
///
/// Unranked players (tier or division 0) score 0.
pub fn ladder_score(tier: u8, division: u8, league_points: u32) -> f64 {
    if tier == 0 || division == 0 {
        return 0.0;
    }
    let steps = (f64::from(tier) - 1.0) * 4.0 + (f64::from(division) - 1.0);
    steps * 100.0 + f64::from(league_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_and_ordinal() {
        assert_eq!(Tier::parse("IRON").ordinal(), 1);
        assert_eq!(Tier::parse("gold").ordinal(), 4);
        assert_eq!(Tier::parse("CHALLENGER").ordinal(), 10);
        assert_eq!(Tier::parse("").ordinal(), 0);
        assert_eq!(Tier::parse("WOOD"), Tier::Unranked);
    }

    #[test]
    fn test_tier_from_ordinal() {
        assert_eq!(Tier::from_ordinal(7), Some(Tier::Diamond));
        assert_eq!(Tier::from_ordinal(11), None);
    }

    #[test]
    fn test_division_mapping() {
        assert_eq!(division_from_roman("IV"), 1);
        assert_eq!(division_from_roman("I"), 4);
        assert_eq!(division_from_roman(""), 0);
        assert_eq!(division_to_roman(3), Some("II"));
        assert_eq!(division_to_roman(0), None);
    }

    #[test]
    fn test_ladder_score() {
        // Iron IV 0 LP is the bottom of the ladder
        assert_eq!(ladder_score(1, 1, 0), 0.0);
        // Gold II 40 LP: (3 * 4 + 2) * 100 + 40
        assert_eq!(ladder_score(4, 3, 40), 1440.0);
        assert_eq!(ladder_score(0, 0, 75), 0.0);
    }

    #[test]
    fn test_ladder_score_with_extreme_inputs() {
        assert_eq!(ladder_score(1, 1, u32::MAX), f64::from(u32::MAX));
        assert_eq!(
            ladder_score(u8::MAX, u8::MAX, u32::MAX),
            ((254.0 * 4.0) + 254.0) * 100.0 + f64::from(u32::MAX)
        );
    }
}
