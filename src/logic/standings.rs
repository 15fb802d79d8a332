//! Read-only projection of a fixture into a league table or a bracket view.

use crate::models::{Fixture, FixtureFormat, FixtureRecords, FixtureStatus, Matchup, TeamRecord};
use serde::Serialize;

/// One row of a league table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LeagueRow {
    /// 1-based; teams level on points share a rank (1, 1, 3).
    pub rank: usize,
    pub team: String,
    #[serde(flatten)]
    pub record: TeamRecord,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LeagueTable {
    pub game_name: String,
    pub status: FixtureStatus,
    pub rows: Vec<LeagueRow>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketRoundView {
    pub label: String,
    pub matches: Vec<Matchup>,
    pub winners: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketView {
    pub game_name: String,
    pub status: FixtureStatus,
    pub byes_to_round2: Vec<String>,
    /// Rounds in play order.
    pub rounds: Vec<BracketRoundView>,
    pub champion: Option<String>,
}

/// Display structure for `table`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "tournament_type", rename_all = "snake_case")]
pub enum Projection {
    League(LeagueTable),
    Knockout(BracketView),
}

/// Project a fixture (and its records, if any) for display. Never mutates.
pub fn project(fixture: &Fixture, records: Option<&FixtureRecords>) -> Projection {
    match &fixture.format {
        FixtureFormat::League { .. } => Projection::League(league_table(fixture, records)),
        FixtureFormat::Knockout { byes_to_round2, .. } => Projection::Knockout(BracketView {
            game_name: fixture.game_name.clone(),
            status: fixture.status,
            byes_to_round2: byes_to_round2.clone(),
            rounds: fixture
                .bracket_rounds()
                .into_iter()
                .map(|(label, round)| BracketRoundView {
                    label,
                    matches: round.matches.clone(),
                    winners: round.winners.clone(),
                })
                .collect(),
            champion: fixture.champion().cloned(),
        }),
    }
}

fn league_table(fixture: &Fixture, records: Option<&FixtureRecords>) -> LeagueTable {
    let mut standings: Vec<(String, TeamRecord)> = fixture
        .teams
        .iter()
        .map(|team| {
            let record = records
                .and_then(|r| r.get(team))
                .copied()
                .unwrap_or_default();
            (team.clone(), record)
        })
        .collect();
    standings.sort_by(|(name_a, a), (name_b, b)| b.points.cmp(&a.points).then(name_a.cmp(name_b)));

    let mut rows: Vec<LeagueRow> = Vec::with_capacity(standings.len());
    for (i, (team, record)) in standings.into_iter().enumerate() {
        let rank = match rows.last() {
            Some(prev) if prev.record.points == record.points => prev.rank,
            _ => i + 1,
        };
        rows.push(LeagueRow { rank, team, record });
    }

    LeagueTable {
        game_name: fixture.game_name.clone(),
        status: fixture.status,
        rows,
    }
}
