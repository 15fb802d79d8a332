//! Data structures for fixtures: schedules, brackets, league records and counters.

mod fixture;
mod game;
mod record;

pub use fixture::{
    Fixture, FixtureCode, FixtureError, FixtureFormat, FixtureStatus, Fixtures, TournamentType,
};
pub use game::{round_label, BracketRound, MatchResult, Matchup};
pub use record::{
    FixtureRecords, Records, TeamRecord, TournamentCounts, POINTS_FOR_DRAW, POINTS_FOR_WIN,
};
