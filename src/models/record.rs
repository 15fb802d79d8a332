//! League records and tournament counters.

use crate::models::fixture::{FixtureCode, Fixtures};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points for a win and for a draw. Losses score nothing.
pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Cumulative league statistics for one team.
///
/// `played == wins + losses + draws` and `points == 3 * wins + draws` hold
/// after every mutation, since each method updates all affected fields.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub points: u32,
}

impl TeamRecord {
    /// Record a win for this team.
    pub fn add_win(&mut self) {
        self.played += 1;
        self.wins += 1;
        self.points += POINTS_FOR_WIN;
    }

    /// Record a loss for this team.
    pub fn add_loss(&mut self) {
        self.played += 1;
        self.losses += 1;
    }

    /// Record a draw for this team.
    pub fn add_draw(&mut self) {
        self.played += 1;
        self.draws += 1;
        self.points += POINTS_FOR_DRAW;
    }
}

/// Records for one fixture, by team name.
pub type FixtureRecords = BTreeMap<String, TeamRecord>;

/// All records by fixture code, as stored in `records.json`.
pub type Records = BTreeMap<FixtureCode, FixtureRecords>;

/// Active and completed fixture counts (`tournaments.json`).
///
/// Derived from the fixture store; never updated incrementally.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentCounts {
    #[serde(default)]
    pub active_count: u32,
    #[serde(default)]
    pub completed_count: u32,
}

impl TournamentCounts {
    pub fn from_fixtures(fixtures: &Fixtures) -> Self {
        fixtures
            .values()
            .fold(Self::default(), |mut counts, fixture| {
                if fixture.is_completed() {
                    counts.completed_count += 1;
                } else {
                    counts.active_count += 1;
                }
                counts
            })
    }
}
