//! Fixture, its format-specific schedule, and fixture errors.

use crate::models::game::{round_label, BracketRound, Matchup};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Human-typeable fixture identifier, `fixture-XXXXXX`.
pub type FixtureCode = String;

/// All fixtures by code, as stored in `fixtures.json`.
pub type Fixtures = BTreeMap<FixtureCode, Fixture>;

/// Errors raised while building a fixture or recording a result.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FixtureError {
    /// Fewer than two team names were given.
    #[error("You need at least 2 teams")]
    NotEnoughTeams,
    /// Fewer than two names remained after removing duplicates.
    #[error("You need at least 2 unique teams")]
    NotEnoughUniqueTeams,
    /// League rounds must be a positive number.
    #[error("Number of rounds must be positive")]
    InvalidRounds,
    #[error("This fixture is already complete")]
    AlreadyCompleted,
    #[error("Team `{0}` is not in this fixture")]
    TeamNotInFixture(String),
    #[error("A team cannot play against itself")]
    SameTeam,
    #[error("Invalid result `{0}`: use only W (win), L (loss), or T (tie)")]
    InvalidResultToken(String),
    #[error("Invalid result combination")]
    InvalidResultCombination,
    #[error("Knockout matches must have a winner (W) and a loser (L). Ties are not allowed")]
    TiesNotAllowed,
    /// The pair is not a match of the current knockout round.
    #[error("{0} vs {1} is not a match in the current round")]
    MatchNotScheduled(String, String),
    #[error("{0} vs {1} already has a result")]
    MatchAlreadyDecided(String, String),
}

/// Tournament format, as chosen when the fixture is created.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    League,
    Knockout,
}

/// Lifecycle of a fixture. Moves to `Completed` once and never back.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Active,
    Completed,
}

/// Format-specific part of a fixture document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tournament_type", rename_all = "snake_case")]
pub enum FixtureFormat {
    /// Full shuffled schedule; each pair appears once per round.
    League {
        #[serde(default)]
        matches: Vec<Matchup>,
    },
    Knockout {
        #[serde(default)]
        byes_to_round2: Vec<String>,
        /// Keyed by [`round_label`].
        #[serde(default)]
        bracket: BTreeMap<String, BracketRound>,
    },
}

/// One tournament: a game, its teams and their schedule or bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub game_name: String,
    #[serde(flatten)]
    pub format: FixtureFormat,
    pub teams: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: FixtureStatus,
}

impl Fixture {
    pub fn new(game_name: impl Into<String>, teams: Vec<String>, format: FixtureFormat) -> Self {
        Self {
            game_name: game_name.into(),
            format,
            teams,
            date: Utc::now(),
            status: FixtureStatus::Active,
        }
    }

    pub fn tournament_type(&self) -> TournamentType {
        match self.format {
            FixtureFormat::League { .. } => TournamentType::League,
            FixtureFormat::Knockout { .. } => TournamentType::Knockout,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == FixtureStatus::Completed
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }

    /// Mark the fixture completed. Idempotent.
    pub fn complete(&mut self) {
        self.status = FixtureStatus::Completed;
    }

    /// Knockout rounds in play order. Empty for leagues.
    pub fn bracket_rounds(&self) -> Vec<(String, &BracketRound)> {
        match &self.format {
            FixtureFormat::League { .. } => Vec::new(),
            FixtureFormat::Knockout { bracket, .. } => (1..=bracket.len())
                .map(round_label)
                .filter_map(|label| bracket.get(&label).map(|r| (label, r)))
                .collect(),
        }
    }

    /// The knockout winner, once the final has been recorded.
    pub fn champion(&self) -> Option<&String> {
        if !self.is_completed() {
            return None;
        }
        let (_, last) = self.bracket_rounds().pop()?;
        match last.matches.as_slice() {
            [only] => last.winner_of(only),
            _ => None,
        }
    }
}
