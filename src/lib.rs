//! Tournament fixture bot: league and knockout fixtures, results, standings.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod prompt;
pub mod service;
pub mod store;

pub use config::{Config, Settings};
pub use logic::{
    create_knockout, create_league, prepare_teams, project, record_result, BracketView,
    LeagueRow, LeagueTable, Projection, RecordOutcome,
};
pub use models::{
    BracketRound, Fixture, FixtureCode, FixtureError, FixtureFormat, FixtureRecords,
    FixtureStatus, Fixtures, MatchResult, Matchup, Records, TeamRecord, TournamentCounts,
    TournamentType,
};
pub use prompt::{PromptError, PromptId, UserId};
pub use service::{
    CommandError, ConfirmOutcome, CreatedFixture, FixtureBot, FixtureDraft, FormatOutcome,
};
pub use store::{JsonStore, StoreError};
