//! Match results, pairings and knockout bracket rounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Two team names meeting in one match. Serialised as a two-element array.
pub type Matchup = (String, String);

/// Result reported for one side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
    Tie,
}

impl FromStr for MatchResult {
    type Err = String;

    /// Parses `W`, `L` or `T`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" => Ok(MatchResult::Win),
            "L" => Ok(MatchResult::Loss),
            "T" => Ok(MatchResult::Tie),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            MatchResult::Win => "W",
            MatchResult::Loss => "L",
            MatchResult::Tie => "T",
        };
        f.write_str(token)
    }
}

/// One round of a knockout bracket.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub matches: Vec<Matchup>,
    /// Winners in the order results were recorded.
    #[serde(default)]
    pub winners: Vec<String>,
}

impl BracketRound {
    pub fn new(matches: Vec<Matchup>) -> Self {
        Self {
            matches,
            winners: Vec::new(),
        }
    }

    /// The recorded winner of a match, if any.
    pub fn winner_of(&self, matchup: &Matchup) -> Option<&String> {
        self.winners
            .iter()
            .find(|w| **w == matchup.0 || **w == matchup.1)
    }

    /// True once every match in the round has a winner.
    pub fn is_decided(&self) -> bool {
        self.matches.iter().all(|m| self.winner_of(m).is_some())
    }

    /// Winners in bracket order (match order, not recording order).
    pub fn advancing(&self) -> Vec<String> {
        self.matches
            .iter()
            .filter_map(|m| self.winner_of(m).cloned())
            .collect()
    }
}

/// Bracket key for a 1-based round number, e.g. `Round 1`.
pub fn round_label(round: usize) -> String {
    format!("Round {round}")
}
