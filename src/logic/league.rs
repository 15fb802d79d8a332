//! League results: per-team records and the count-based completion check.

use crate::models::{Fixture, FixtureError, FixtureFormat, FixtureRecords, MatchResult};

/// Which side took the points.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LeagueOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

fn outcome(result1: MatchResult, result2: MatchResult) -> Result<LeagueOutcome, FixtureError> {
    match (result1, result2) {
        (MatchResult::Win, MatchResult::Loss) => Ok(LeagueOutcome::FirstWins),
        (MatchResult::Loss, MatchResult::Win) => Ok(LeagueOutcome::SecondWins),
        (MatchResult::Tie, MatchResult::Tie) => Ok(LeagueOutcome::Draw),
        _ => Err(FixtureError::InvalidResultCombination),
    }
}

/// Apply a league result. Returns whether the fixture is now completed.
///
/// Teams must already be validated as fixture members. Records for every team
/// are zero-initialised on first use.
pub(crate) fn apply_league_result(
    fixture: &mut Fixture,
    records: &mut FixtureRecords,
    team1: &str,
    result1: MatchResult,
    team2: &str,
    result2: MatchResult,
) -> Result<bool, FixtureError> {
    let scheduled = match &fixture.format {
        FixtureFormat::League { matches } => matches.len(),
        FixtureFormat::Knockout { .. } => return Err(FixtureError::InvalidResultCombination),
    };
    let outcome = outcome(result1, result2)?;

    for team in &fixture.teams {
        records.entry(team.clone()).or_default();
    }
    // Both entries exist after the loop above.
    let mut first = records.get(team1).copied().unwrap_or_default();
    let mut second = records.get(team2).copied().unwrap_or_default();
    match outcome {
        LeagueOutcome::FirstWins => {
            first.add_win();
            second.add_loss();
        }
        LeagueOutcome::SecondWins => {
            first.add_loss();
            second.add_win();
        }
        LeagueOutcome::Draw => {
            first.add_draw();
            second.add_draw();
        }
    }
    records.insert(team1.to_string(), first);
    records.insert(team2.to_string(), second);

    // Count heuristic: half the total appearances against the schedule length.
    let total_played: usize = records.values().map(|r| r.played as usize).sum();
    let completed = scheduled > 0 && total_played / 2 >= scheduled;
    if completed {
        fixture.complete();
    }
    Ok(completed)
}
