//! Knockout results: record winners, generate the next round, crown a champion.

use crate::logic::setup::pair_consecutive;
use crate::models::{round_label, BracketRound, Fixture, FixtureError, FixtureFormat};

/// What a recorded knockout result did to the bracket.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Advancement {
    /// Label of the round generated by this result, if the current round just finished.
    pub next_round: Option<String>,
    /// Set when this result decided the final.
    pub champion: Option<String>,
}

/// Record `winner` beating `loser` in the current round.
///
/// The pair must be an undecided match of the latest round. When the round's
/// last match is decided, round 2 is drawn from the round-1 byes followed by
/// the round-1 winners; later rounds take the previous winners in bracket order.
pub(crate) fn apply_knockout_result(
    fixture: &mut Fixture,
    winner: &str,
    loser: &str,
) -> Result<Advancement, FixtureError> {
    let FixtureFormat::Knockout {
        byes_to_round2,
        bracket,
    } = &mut fixture.format
    else {
        return Err(FixtureError::InvalidResultCombination);
    };

    let current = bracket.len();
    let not_scheduled = || FixtureError::MatchNotScheduled(winner.to_string(), loser.to_string());
    let round = bracket
        .get_mut(&round_label(current))
        .ok_or_else(not_scheduled)?;

    let matchup = round
        .matches
        .iter()
        .find(|(a, b)| (a == winner && b == loser) || (a == loser && b == winner))
        .cloned()
        .ok_or_else(not_scheduled)?;
    if round.winner_of(&matchup).is_some() {
        return Err(FixtureError::MatchAlreadyDecided(matchup.0, matchup.1));
    }
    round.winners.push(winner.to_string());

    if !round.is_decided() {
        return Ok(Advancement::default());
    }

    let mut entrants = if current == 1 {
        byes_to_round2.clone()
    } else {
        Vec::new()
    };
    entrants.extend(round.advancing());

    if let [champion] = entrants.as_slice() {
        let champion = champion.clone();
        fixture.complete();
        log::info!("Knockout won by {champion}");
        return Ok(Advancement {
            next_round: None,
            champion: Some(champion),
        });
    }

    let label = round_label(current + 1);
    bracket.insert(label.clone(), BracketRound::new(pair_consecutive(&entrants)));
    Ok(Advancement {
        next_round: Some(label),
        champion: None,
    })
}
