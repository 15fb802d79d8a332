//! Result recording entry point: validation shared by both formats, then dispatch.

use crate::logic::knockout::apply_knockout_result;
use crate::logic::league::apply_league_result;
use crate::models::{Fixture, FixtureError, FixtureFormat, FixtureRecords, MatchResult};
use serde::Serialize;

/// What happened after a result was accepted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "tournament_type", rename_all = "snake_case")]
pub enum RecordOutcome {
    League {
        completed: bool,
    },
    Knockout {
        winner: String,
        /// Round generated because this result finished the previous one.
        next_round: Option<String>,
        champion: Option<String>,
    },
}

impl RecordOutcome {
    /// True if this result moved the fixture to completed.
    pub fn completed_fixture(&self) -> bool {
        match self {
            RecordOutcome::League { completed } => *completed,
            RecordOutcome::Knockout { champion, .. } => champion.is_some(),
        }
    }
}

fn parse_result(token: &str) -> Result<MatchResult, FixtureError> {
    token.parse().map_err(FixtureError::InvalidResultToken)
}

/// Record `team1 result1` vs `team2 result2` against a fixture.
///
/// Every check runs before anything is mutated, so an `Err` leaves both
/// `fixture` and `records` untouched. `records` is only written for leagues.
pub fn record_result(
    fixture: &mut Fixture,
    records: &mut FixtureRecords,
    team1: &str,
    result1: &str,
    team2: &str,
    result2: &str,
) -> Result<RecordOutcome, FixtureError> {
    if fixture.is_completed() {
        return Err(FixtureError::AlreadyCompleted);
    }
    for team in [team1, team2] {
        if !fixture.has_team(team) {
            return Err(FixtureError::TeamNotInFixture(team.to_string()));
        }
    }
    if team1 == team2 {
        return Err(FixtureError::SameTeam);
    }
    let result1 = parse_result(result1)?;
    let result2 = parse_result(result2)?;

    match fixture.format {
        FixtureFormat::League { .. } => {
            let completed = apply_league_result(fixture, records, team1, result1, team2, result2)?;
            Ok(RecordOutcome::League { completed })
        }
        FixtureFormat::Knockout { .. } => {
            let (winner, loser) = match (result1, result2) {
                (MatchResult::Win, MatchResult::Loss) => (team1, team2),
                (MatchResult::Loss, MatchResult::Win) => (team2, team1),
                (MatchResult::Tie, _) | (_, MatchResult::Tie) => {
                    return Err(FixtureError::TiesNotAllowed)
                }
                _ => return Err(FixtureError::InvalidResultCombination),
            };
            let advancement = apply_knockout_result(fixture, winner, loser)?;
            Ok(RecordOutcome::Knockout {
                winner: winner.to_string(),
                next_round: advancement.next_round,
                champion: advancement.champion,
            })
        }
    }
}
