//! The fixture bot's command surface.
//!
//! Every command re-reads the JSON documents, applies its change in memory and
//! writes the documents back. A single writer lock covers the whole cycle, so
//! two commands never interleave their reads and writes. The documents are
//! separate files, so a failed write can leave `fixtures.json` updated while
//! `records.json` is not.

use crate::config::Settings;
use crate::logic::{
    create_knockout, create_league, prepare_teams, project, record_result, unique_code,
    Projection, RecordOutcome,
};
use crate::models::{
    Fixture, FixtureCode, FixtureError, Fixtures, Records, TournamentCounts, TournamentType,
};
use crate::prompt::{PromptError, PromptId, PromptKind, Prompts, Step, UserId};
use crate::store::{JsonStore, StoreError};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Fixture `{0}` not found")]
    FixtureNotFound(FixtureCode),
    #[error("You are not authorized to use this command")]
    NotAuthorized,
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A fixture waiting for its format to be chosen.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FixtureDraft {
    pub prompt_id: PromptId,
    pub game_name: String,
    /// Deduplicated team names.
    pub teams: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreatedFixture {
    pub code: FixtureCode,
    pub fixture: Fixture,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormatOutcome {
    Created(CreatedFixture),
    /// League chosen; answer the prompt with a number of rounds.
    AwaitingRounds { prompt_id: PromptId },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfirmOutcome {
    Deleted { code: FixtureCode },
    DeletedAll,
    Cancelled,
}

/// One entry of the command reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct CommandHelp {
    pub command: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        command: "fixture",
        description: "Start creating a tournament, then pick league or knockout",
        example: "fixture \"Chess Championship\" PlayerA PlayerB",
    },
    CommandHelp {
        command: "table",
        description: "Show the leaderboard for a league or the bracket for a knockout",
        example: "table fixture-XYZ123",
    },
    CommandHelp {
        command: "record",
        description: "Record a match result; T (tie) is allowed in leagues only",
        example: "record fixture-XYZ123 Alpha W Beta L",
    },
    CommandHelp {
        command: "summary",
        description: "Show counts of active and completed tournaments",
        example: "summary",
    },
    CommandHelp {
        command: "delete",
        description: "Delete a fixture and its records",
        example: "delete fixture-XYZ123",
    },
    CommandHelp {
        command: "delete-all",
        description: "Delete every fixture and record (owner only)",
        example: "delete-all",
    },
];

/// Fixture service: store, pending prompts and settings.
pub struct FixtureBot {
    store: Mutex<JsonStore>,
    prompts: Mutex<Prompts>,
    settings: Settings,
}

/// State lives on disk and is re-read by every command, so a poisoned lock
/// holds nothing stale.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FixtureBot {
    /// Build the service and resync the counters from the fixture store.
    pub fn new(store: JsonStore, settings: Settings) -> Result<Self, CommandError> {
        let counts = store.sync_counts()?;
        log::info!(
            "Tournament counts synced: {} active, {} completed",
            counts.active_count,
            counts.completed_count
        );
        Ok(Self {
            store: Mutex::new(store),
            prompts: Mutex::new(Prompts::new()),
            settings,
        })
    }

    /// Validate the team list and ask for a format.
    pub fn begin_fixture<S: AsRef<str>>(
        &self,
        user_id: UserId,
        game_name: &str,
        teams: &[S],
    ) -> Result<FixtureDraft, CommandError> {
        let teams = prepare_teams(teams)?;
        let prompt_id = lock(&self.prompts).open(
            user_id,
            PromptKind::ChooseFormat {
                game_name: game_name.to_string(),
                teams: teams.clone(),
            },
            self.settings.format_timeout,
        );
        Ok(FixtureDraft {
            prompt_id,
            game_name: game_name.to_string(),
            teams,
        })
    }

    /// Answer the format prompt. Knockout fixtures are created immediately.
    pub fn choose_format(
        &self,
        user_id: UserId,
        prompt_id: PromptId,
        format: TournamentType,
    ) -> Result<FormatOutcome, CommandError> {
        let mut prompts = lock(&self.prompts);
        let PromptKind::ChooseFormat { game_name, teams } =
            prompts.take(prompt_id, user_id, Step::Format)?
        else {
            return Err(PromptError::NotFound.into());
        };
        match format {
            TournamentType::League => {
                let prompt_id = prompts.open(
                    user_id,
                    PromptKind::EnterRounds { game_name, teams },
                    self.settings.rounds_timeout,
                );
                Ok(FormatOutcome::AwaitingRounds { prompt_id })
            }
            TournamentType::Knockout => {
                drop(prompts);
                let created = self.insert_fixture(|rng| create_knockout(&game_name, &teams, rng))?;
                Ok(FormatOutcome::Created(created))
            }
        }
    }

    /// Answer the rounds prompt. Zero rounds aborts creation.
    pub fn submit_rounds(
        &self,
        user_id: UserId,
        prompt_id: PromptId,
        rounds: u32,
    ) -> Result<CreatedFixture, CommandError> {
        let PromptKind::EnterRounds { game_name, teams } =
            lock(&self.prompts).take(prompt_id, user_id, Step::Rounds)?
        else {
            return Err(PromptError::NotFound.into());
        };
        self.insert_fixture(|rng| create_league(&game_name, &teams, rounds, rng))
    }

    fn insert_fixture<F>(&self, build: F) -> Result<CreatedFixture, CommandError>
    where
        F: FnOnce(&mut rand::rngs::ThreadRng) -> Result<Fixture, FixtureError>,
    {
        let mut rng = rand::thread_rng();
        let fixture = build(&mut rng)?;

        let store = lock(&self.store);
        let mut fixtures = store.load_fixtures()?;
        let code = unique_code(&mut rng, |c| fixtures.contains_key(c));
        fixtures.insert(code.clone(), fixture.clone());
        store.save_fixtures(&fixtures)?;
        store.sync_counts()?;

        log::info!(
            "Created {:?} fixture {code} for {} with {} teams",
            fixture.tournament_type(),
            fixture.game_name,
            fixture.teams.len()
        );
        Ok(CreatedFixture { code, fixture })
    }

    /// Record a result. Nothing is written unless the result is accepted.
    pub fn record_result(
        &self,
        code: &str,
        team1: &str,
        result1: &str,
        team2: &str,
        result2: &str,
    ) -> Result<RecordOutcome, CommandError> {
        let store = lock(&self.store);
        let mut fixtures = store.load_fixtures()?;
        let mut records = store.load_records()?;

        let fixture = fixtures
            .get_mut(code)
            .ok_or_else(|| CommandError::FixtureNotFound(code.to_string()))?;
        let mut fixture_records = records.get(code).cloned().unwrap_or_default();
        let outcome = record_result(
            fixture,
            &mut fixture_records,
            team1,
            result1,
            team2,
            result2,
        )?;

        // Fixtures first: a failed records write must not re-open the fixture.
        store.save_fixtures(&fixtures)?;
        if let RecordOutcome::League { .. } = outcome {
            records.insert(code.to_string(), fixture_records);
            store.save_records(&records)?;
        }
        store.sync_counts()?;

        log::info!("Recorded {team1} {result1} vs {team2} {result2} in {code}");
        if outcome.completed_fixture() {
            log::info!("Fixture {code} is now complete");
        }
        Ok(outcome)
    }

    /// League table or bracket for a fixture.
    pub fn table(&self, code: &str) -> Result<Projection, CommandError> {
        let store = lock(&self.store);
        let fixtures = store.load_fixtures()?;
        let records = store.load_records()?;
        let fixture = fixtures
            .get(code)
            .ok_or_else(|| CommandError::FixtureNotFound(code.to_string()))?;
        Ok(project(fixture, records.get(code)))
    }

    /// Counts recomputed from the fixtures; the stored document is refreshed too.
    pub fn summary(&self) -> Result<TournamentCounts, CommandError> {
        Ok(lock(&self.store).sync_counts()?)
    }

    pub fn fixtures(&self) -> Result<Fixtures, CommandError> {
        Ok(lock(&self.store).load_fixtures()?)
    }

    pub fn records(&self) -> Result<Records, CommandError> {
        Ok(lock(&self.store).load_records()?)
    }

    /// Ask for confirmation before deleting a fixture and its records.
    pub fn request_delete(&self, user_id: UserId, code: &str) -> Result<PromptId, CommandError> {
        if !lock(&self.store).load_fixtures()?.contains_key(code) {
            return Err(CommandError::FixtureNotFound(code.to_string()));
        }
        Ok(lock(&self.prompts).open(
            user_id,
            PromptKind::ConfirmDelete {
                code: code.to_string(),
            },
            self.settings.confirm_timeout,
        ))
    }

    /// Ask the owner to confirm wiping every fixture and record.
    pub fn request_delete_all(&self, user_id: UserId) -> Result<PromptId, CommandError> {
        if self.settings.owner_id != Some(user_id) {
            return Err(CommandError::NotAuthorized);
        }
        Ok(lock(&self.prompts).open(
            user_id,
            PromptKind::ConfirmDeleteAll,
            self.settings.confirm_timeout,
        ))
    }

    /// Answer a delete confirmation with Y (`true`) or N (`false`).
    pub fn confirm(
        &self,
        user_id: UserId,
        prompt_id: PromptId,
        confirmed: bool,
    ) -> Result<ConfirmOutcome, CommandError> {
        let kind = lock(&self.prompts).take(prompt_id, user_id, Step::Confirm)?;
        if !confirmed {
            return Ok(ConfirmOutcome::Cancelled);
        }
        match kind {
            PromptKind::ConfirmDelete { code } => self.delete(&code),
            PromptKind::ConfirmDeleteAll => self.delete_all(),
            PromptKind::ChooseFormat { .. } | PromptKind::EnterRounds { .. } => {
                Err(PromptError::NotFound.into())
            }
        }
    }

    fn delete(&self, code: &str) -> Result<ConfirmOutcome, CommandError> {
        let store = lock(&self.store);
        let mut fixtures = store.load_fixtures()?;
        let mut records = store.load_records()?;
        if fixtures.remove(code).is_none() {
            return Err(CommandError::FixtureNotFound(code.to_string()));
        }
        records.remove(code);
        store.save_fixtures(&fixtures)?;
        store.save_records(&records)?;
        store.sync_counts()?;
        log::info!("Deleted fixture {code} and its records");
        Ok(ConfirmOutcome::Deleted {
            code: code.to_string(),
        })
    }

    fn delete_all(&self) -> Result<ConfirmOutcome, CommandError> {
        let store = lock(&self.store);
        store.save_fixtures(&Fixtures::new())?;
        store.save_records(&Records::new())?;
        store.sync_counts()?;
        log::warn!("Deleted all fixtures and records");
        Ok(ConfirmOutcome::DeletedAll)
    }

    /// Drop prompts nobody answered in time.
    pub fn sweep_prompts(&self) -> usize {
        lock(&self.prompts).sweep_expired()
    }

    pub fn help(&self) -> &'static [CommandHelp] {
        COMMANDS
    }
}
