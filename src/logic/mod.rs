//! Fixture business logic: creation, result recording, standings.

mod knockout;
mod league;
mod results;
mod setup;
mod standings;

pub use results::{record_result, RecordOutcome};
pub use setup::{
    bye_count, create_knockout, create_league, generate_code, pair_consecutive, prepare_teams,
    round_robin_pairs, unique_code,
};
pub use standings::{project, BracketRoundView, BracketView, LeagueRow, LeagueTable, Projection};
