//! Integration tests for knockout fixtures: byes, round 1 pairing and bracket advancement.

use fixture_bot::logic::bye_count;
use fixture_bot::{
    create_knockout, record_result, Fixture, FixtureError, FixtureFormat, FixtureRecords,
    FixtureStatus, RecordOutcome,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn teams(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("T{i}")).collect()
}

fn knockout(n: usize, seed: u64) -> Fixture {
    let mut rng = StdRng::seed_from_u64(seed);
    create_knockout("Darts", &teams(n), &mut rng).unwrap()
}

/// Undecided matches of the latest round.
fn open_matches(fixture: &Fixture) -> Vec<(String, String)> {
    let (_, round) = fixture.bracket_rounds().pop().unwrap();
    round
        .matches
        .iter()
        .filter(|m| round.winner_of(m).is_none())
        .cloned()
        .collect()
}

#[test]
fn byes_fill_to_next_power_of_two_without_dropping_teams() {
    for n in 2..=64usize {
        let fixture = knockout(n, n as u64);
        let FixtureFormat::Knockout {
            byes_to_round2,
            bracket,
        } = &fixture.format
        else {
            panic!("expected a knockout");
        };
        let expected_byes = n.next_power_of_two() - n;
        assert_eq!(byes_to_round2.len(), expected_byes);
        assert_eq!(bye_count(n), expected_byes);

        let round_1 = &bracket["Round 1"];
        assert!(round_1.winners.is_empty());
        // n - byes is always even, so nobody is left out of round 1.
        assert_eq!(byes_to_round2.len() + 2 * round_1.matches.len(), n);

        let mut seen: HashSet<&String> = byes_to_round2.iter().collect();
        for (a, b) in &round_1.matches {
            assert!(seen.insert(a));
            assert!(seen.insert(b));
        }
        assert_eq!(seen.len(), n);
    }
}

#[test]
fn only_round_one_is_generated_up_front() {
    let fixture = knockout(5, 1);
    assert_eq!(fixture.bracket_rounds().len(), 1);
    assert_eq!(fixture.status, FixtureStatus::Active);
}

#[test]
fn ties_are_not_allowed() {
    let mut fixture = knockout(4, 2);
    let (a, b) = open_matches(&fixture)[0].clone();
    let before = fixture.clone();
    assert_eq!(
        record_result(&mut fixture, &mut FixtureRecords::new(), &a, "T", &b, "T"),
        Err(FixtureError::TiesNotAllowed)
    );
    assert_eq!(
        record_result(&mut fixture, &mut FixtureRecords::new(), &a, "W", &b, "W"),
        Err(FixtureError::InvalidResultCombination)
    );
    assert_eq!(fixture, before);
}

#[test]
fn winner_is_recorded_and_match_cannot_be_replayed() {
    let mut fixture = knockout(4, 3);
    let (a, b) = open_matches(&fixture)[0].clone();
    let mut records = FixtureRecords::new();

    let outcome = record_result(&mut fixture, &mut records, &a, "L", &b, "W").unwrap();
    assert_eq!(
        outcome,
        RecordOutcome::Knockout {
            winner: b.clone(),
            next_round: None,
            champion: None,
        }
    );
    assert_eq!(fixture.bracket_rounds()[0].1.winners, vec![b.clone()]);
    assert!(records.is_empty());

    assert_eq!(
        record_result(&mut fixture, &mut records, &a, "W", &b, "L"),
        Err(FixtureError::MatchAlreadyDecided(a.clone(), b.clone()))
    );
}

#[test]
fn unscheduled_pair_is_rejected() {
    let mut fixture = knockout(4, 4);
    let matches = open_matches(&fixture);
    let (a, _) = matches[0].clone();
    let (c, _) = matches[1].clone();
    assert_eq!(
        record_result(&mut fixture, &mut FixtureRecords::new(), &a, "W", &c, "L"),
        Err(FixtureError::MatchNotScheduled(a.clone(), c.clone()))
    );
}

#[test]
fn bye_team_joins_round_two() {
    let mut fixture = knockout(3, 5);
    let FixtureFormat::Knockout { byes_to_round2, .. } = &fixture.format else {
        panic!("expected a knockout");
    };
    let bye = byes_to_round2[0].clone();
    let (a, b) = open_matches(&fixture)[0].clone();

    let outcome =
        record_result(&mut fixture, &mut FixtureRecords::new(), &a, "W", &b, "L").unwrap();
    assert_eq!(
        outcome,
        RecordOutcome::Knockout {
            winner: a.clone(),
            next_round: Some("Round 2".to_string()),
            champion: None,
        }
    );
    assert_eq!(open_matches(&fixture), vec![(bye, a)]);
}

#[test]
fn knockout_completes_after_n_minus_one_results() {
    for n in 2..=17usize {
        let mut fixture = knockout(n, 100 + n as u64);
        let mut records = FixtureRecords::new();
        let mut recorded = 0;
        let mut champion = None;

        while fixture.status == FixtureStatus::Active {
            let (a, b) = open_matches(&fixture)[0].clone();
            let outcome = record_result(&mut fixture, &mut records, &a, "W", &b, "L").unwrap();
            recorded += 1;
            if let RecordOutcome::Knockout {
                champion: Some(c), ..
            } = outcome
            {
                champion = Some(c);
            }
            assert!(recorded < n, "bracket for {n} teams did not finish");
        }

        assert_eq!(recorded, n - 1);
        let champion = champion.unwrap();
        assert!(teams(n).contains(&champion));
        assert_eq!(fixture.champion(), Some(&champion));
        assert_eq!(
            fixture.bracket_rounds().len(),
            n.next_power_of_two().trailing_zeros() as usize
        );
    }
}

#[test]
fn completed_knockout_rejects_results() {
    let mut fixture = knockout(2, 6);
    let (a, b) = open_matches(&fixture)[0].clone();
    record_result(&mut fixture, &mut FixtureRecords::new(), &a, "W", &b, "L").unwrap();
    assert_eq!(fixture.status, FixtureStatus::Completed);
    assert_eq!(
        record_result(&mut fixture, &mut FixtureRecords::new(), &a, "W", &b, "L"),
        Err(FixtureError::AlreadyCompleted)
    );
}
