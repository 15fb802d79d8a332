//! Interactive steps waiting on a user's reply: format choice, rounds entry, Y/N confirmation.
//!
//! A prompt belongs to the user who opened it and expires at a fixed deadline.
//! Answering an expired prompt fails and has no effect.

use crate::models::FixtureCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a pending prompt.
pub type PromptId = Uuid;

/// Chat-platform user id.
pub type UserId = u64;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PromptError {
    #[error("No pending prompt with that id")]
    NotFound,
    #[error("Timed out waiting for response. No action taken")]
    Expired,
    #[error("This prompt belongs to another user")]
    WrongUser,
    /// The reply does not fit the question being asked.
    #[error("This prompt is waiting for {expected}")]
    WrongStep { expected: &'static str },
}

/// Kind of reply a prompt waits for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    Format,
    Rounds,
    Confirm,
}

impl Step {
    fn describe(self) -> &'static str {
        match self {
            Step::Format => "a tournament format",
            Step::Rounds => "a number of rounds",
            Step::Confirm => "a Y/N confirmation",
        }
    }
}

/// What the prompt will do once answered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PromptKind {
    ChooseFormat { game_name: String, teams: Vec<String> },
    EnterRounds { game_name: String, teams: Vec<String> },
    ConfirmDelete { code: FixtureCode },
    ConfirmDeleteAll,
}

impl PromptKind {
    pub fn step(&self) -> Step {
        match self {
            PromptKind::ChooseFormat { .. } => Step::Format,
            PromptKind::EnterRounds { .. } => Step::Rounds,
            PromptKind::ConfirmDelete { .. } | PromptKind::ConfirmDeleteAll => Step::Confirm,
        }
    }
}

#[derive(Clone, Debug)]
struct Prompt {
    user_id: UserId,
    kind: PromptKind,
    expires_at: Instant,
}

impl Prompt {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// How long a swept prompt is still reported as expired rather than unknown.
const EXPIRED_RETENTION: Duration = Duration::from_secs(10 * 60);

/// Pending prompts by id.
#[derive(Debug, Default)]
pub struct Prompts {
    entries: HashMap<PromptId, Prompt>,
    /// Swept prompt ids and when they were swept.
    expired: HashMap<PromptId, Instant>,
}

impl Prompts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a prompt for `user_id` that expires after `timeout`.
    pub fn open(&mut self, user_id: UserId, kind: PromptKind, timeout: Duration) -> PromptId {
        let id = Uuid::new_v4();
        self.entries.insert(
            id,
            Prompt {
                user_id,
                kind,
                expires_at: Instant::now() + timeout,
            },
        );
        id
    }

    /// Remove and return the prompt if `user_id` may answer it with a `step` reply.
    ///
    /// Expired prompts are dropped. A reply from another user or for another
    /// step leaves the prompt in place.
    pub fn take(
        &mut self,
        id: PromptId,
        user_id: UserId,
        step: Step,
    ) -> Result<PromptKind, PromptError> {
        if self.expired.remove(&id).is_some() {
            return Err(PromptError::Expired);
        }
        let prompt = self.entries.get(&id).ok_or(PromptError::NotFound)?;
        if prompt.is_expired(Instant::now()) {
            self.entries.remove(&id);
            return Err(PromptError::Expired);
        }
        if prompt.user_id != user_id {
            return Err(PromptError::WrongUser);
        }
        let expected = prompt.kind.step();
        if expected != step {
            return Err(PromptError::WrongStep {
                expected: expected.describe(),
            });
        }
        self.entries
            .remove(&id)
            .map(|p| p.kind)
            .ok_or(PromptError::NotFound)
    }

    /// Drop every expired prompt; returns how many were dropped.
    ///
    /// A dropped id still answers `Expired` for a while after the sweep.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Instant::now();
        self.expired
            .retain(|_, swept_at| now.duration_since(*swept_at) < EXPIRED_RETENTION);
        let before = self.entries.len();
        let expired = &mut self.expired;
        self.entries.retain(|id, p| {
            if p.is_expired(now) {
                expired.insert(*id, now);
                false
            } else {
                true
            }
        });
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
