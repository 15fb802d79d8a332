//! Fixture creation: team list cleanup, league schedules, knockout first rounds, fixture codes.

use crate::models::{
    round_label, BracketRound, Fixture, FixtureCode, FixtureError, FixtureFormat, Matchup,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

const CODE_PREFIX: &str = "fixture-";
const CODE_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Trim team names and drop exact (case-sensitive) duplicates, keeping first-seen order.
///
/// Requires at least two names before and after deduplication.
pub fn prepare_teams<I, S>(raw: I) -> Result<Vec<String>, FixtureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: Vec<String> = raw
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if names.len() < 2 {
        return Err(FixtureError::NotEnoughTeams);
    }
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    if unique.len() < 2 {
        return Err(FixtureError::NotEnoughUniqueTeams);
    }
    Ok(unique)
}

/// Every unordered pair of distinct teams, in team order.
pub fn round_robin_pairs(teams: &[String]) -> Vec<Matchup> {
    let mut pairs = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            pairs.push((teams[i].clone(), teams[j].clone()));
        }
    }
    pairs
}

/// Pair teams consecutively: (0 vs 1), (2 vs 3), ...
///
/// A trailing odd team is left out.
pub fn pair_consecutive(teams: &[String]) -> Vec<Matchup> {
    teams
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Build a league fixture: every pair plays `rounds` times, whole schedule shuffled.
///
/// The schedule has `rounds * n * (n - 1) / 2` matches with no per-round structure.
pub fn create_league<R: Rng + ?Sized>(
    game_name: &str,
    teams: &[String],
    rounds: u32,
    rng: &mut R,
) -> Result<Fixture, FixtureError> {
    if teams.len() < 2 {
        return Err(FixtureError::NotEnoughTeams);
    }
    if rounds == 0 {
        return Err(FixtureError::InvalidRounds);
    }
    let pairs = round_robin_pairs(teams);
    let mut matches: Vec<Matchup> = Vec::with_capacity(pairs.len() * rounds as usize);
    for _ in 0..rounds {
        matches.extend(pairs.iter().cloned());
    }
    matches.shuffle(rng);

    Ok(Fixture::new(
        game_name,
        teams.to_vec(),
        FixtureFormat::League { matches },
    ))
}

/// Build a knockout fixture: shuffle, give byes up to the next power of two, pair the rest.
///
/// Only round 1 is generated here; later rounds are created as results come in.
pub fn create_knockout<R: Rng + ?Sized>(
    game_name: &str,
    teams: &[String],
    rng: &mut R,
) -> Result<Fixture, FixtureError> {
    if teams.len() < 2 {
        return Err(FixtureError::NotEnoughTeams);
    }
    let mut shuffled = teams.to_vec();
    shuffled.shuffle(rng);

    let byes = bye_count(shuffled.len());
    let in_round_1 = shuffled.split_off(byes);
    let round_1 = BracketRound::new(pair_consecutive(&in_round_1));

    let mut bracket = BTreeMap::new();
    bracket.insert(round_label(1), round_1);

    Ok(Fixture::new(
        game_name,
        teams.to_vec(),
        FixtureFormat::Knockout {
            byes_to_round2: shuffled,
            bracket,
        },
    ))
}

/// Teams that skip round 1 so that round 2 has a power-of-two field.
///
/// For n >= 2, `n - byes` is `2n - 2^k`, which is always even, so no team is
/// left without a match or a bye.
pub fn bye_count(team_count: usize) -> usize {
    team_count.next_power_of_two() - team_count
}

/// A random fixture code, `fixture-` followed by six characters from A-Z and 0-9.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> FixtureCode {
    let suffix: String = (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect();
    format!("{CODE_PREFIX}{suffix}")
}

/// Generate codes until one is not taken.
pub fn unique_code<R, F>(rng: &mut R, is_taken: F) -> FixtureCode
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let code = generate_code(rng);
        if !is_taken(&code) {
            return code;
        }
        log::warn!("Fixture code {code} already in use, regenerating");
    }
}
