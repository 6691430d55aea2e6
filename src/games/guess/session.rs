use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Active,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    None,
    TooLow,
    TooHigh,
    Correct,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    #[error("enter a number first")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Observable state of a session, safe to hand to a front end.
/// The target only shows up once it is no longer a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: Status,
    pub attempts: u32,
    pub last_feedback: Feedback,
    pub answer_revealed: bool,
    pub paused: bool,
    pub min: i64,
    pub max: i64,
    pub target: Option<i64>,
}

/// One play-through of the guessing game.
pub struct Session<R = StdRng> {
    range: RangeInclusive<i64>,
    rng: R,
    target: Option<i64>,
    attempts: u32,
    status: Status,
    last_feedback: Feedback,
    answer_revealed: bool,
}

impl Session<StdRng> {
    /// A `GameConfig` always carries a non-empty range.
    pub fn new(config: &GameConfig) -> Self {
        Self::from_parts(config.range(), config.rng())
    }
}

impl<R: Rng> Session<R> {
    /// Builds a session drawing from `range` with a caller-supplied rng.
    /// An empty range is refused so that `start` can always draw.
    pub fn with_rng(range: RangeInclusive<i64>, rng: R) -> Result<Self, ConfigError> {
        if range.is_empty() {
            return Err(ConfigError::EmptyRange {
                min: *range.start(),
                max: *range.end(),
            });
        }
        Ok(Self::from_parts(range, rng))
    }

    fn from_parts(range: RangeInclusive<i64>, rng: R) -> Self {
        Self {
            range,
            rng,
            target: None,
            attempts: 0,
            status: Status::Idle,
            last_feedback: Feedback::None,
            answer_revealed: false,
        }
    }

    pub fn start(&mut self) {
        let target = self.rng.random_range(self.range.clone());
        self.begin_round(target);
    }

    fn begin_round(&mut self, target: i64) {
        self.target = Some(target);
        self.attempts = 0;
        self.status = Status::Active;
        self.last_feedback = Feedback::None;
        self.answer_revealed = false;
        info!(min = *self.range.start(), max = *self.range.end(), "round started");
    }

    /// Compares `value` with the target. Returns `None` without touching
    /// anything when the session is not active.
    pub fn guess(&mut self, value: i64) -> Option<Feedback> {
        if self.status != Status::Active {
            debug!(value, status = ?self.status, "guess ignored");
            return None;
        }
        let target = self.target?;

        self.attempts += 1;
        self.last_feedback = if value == target {
            self.status = Status::Won;
            Feedback::Correct
        } else if value < target {
            Feedback::TooLow
        } else {
            Feedback::TooHigh
        };

        if self.status == Status::Won {
            info!(attempts = self.attempts, "round won");
        } else {
            debug!(value, attempts = self.attempts, feedback = ?self.last_feedback, "guess");
        }
        Some(self.last_feedback)
    }

    /// Parses raw player input and forwards it to [`Session::guess`].
    /// Text that is not an integer is rejected and counts for nothing.
    pub fn guess_input(&mut self, input: &str) -> Result<Option<Feedback>, GuessError> {
        if self.status != Status::Active {
            return Ok(None);
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(GuessError::Empty);
        }
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| GuessError::NotANumber(trimmed.to_string()))?;
        Ok(self.guess(value))
    }

    /// Pauses an active round, resumes a paused one, and otherwise starts a
    /// new round. Resuming keeps the target that was already drawn.
    pub fn toggle_pause(&mut self) {
        match self.status {
            Status::Active => {
                self.status = Status::Idle;
                info!(attempts = self.attempts, "round paused");
            }
            Status::Idle if self.is_paused() => {
                self.status = Status::Active;
                info!(attempts = self.attempts, "round resumed");
            }
            Status::Idle | Status::Won => self.start(),
        }
    }

    pub fn try_again(&mut self) {
        self.start();
    }

    /// Discloses the target. Only possible outside active play and once a
    /// target exists; returns whether anything changed.
    pub fn reveal(&mut self) -> bool {
        if !self.can_reveal() {
            return false;
        }
        self.answer_revealed = true;
        info!(secret = ?self.target, attempts = self.attempts, "answer revealed");
        true
    }

    pub fn can_reveal(&self) -> bool {
        self.status != Status::Active && self.target.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.status == Status::Idle && self.target.is_some() && !self.answer_revealed
    }

    pub fn is_fresh(&self) -> bool {
        self.target.is_none()
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn last_feedback(&self) -> Feedback {
        self.last_feedback
    }

    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    pub fn range(&self) -> &RangeInclusive<i64> {
        &self.range
    }

    pub fn snapshot(&self) -> Snapshot {
        let disclosed = self.answer_revealed || self.status == Status::Won;
        Snapshot {
            status: self.status,
            attempts: self.attempts,
            last_feedback: self.last_feedback,
            answer_revealed: self.answer_revealed,
            paused: self.is_paused(),
            min: *self.range.start(),
            max: *self.range.end(),
            target: if disclosed { self.target } else { None },
        }
    }
}
