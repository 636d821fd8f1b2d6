//! Game session entity: identity plus guess history.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::validator::CODE_LENGTH;

/// One scored guess. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct GuessAttempt {
    /// The submitted code.
    code: String,
    /// Digits correct in value and position (black pegs).
    exact_matches: u8,
    /// Digits correct in value but wrong position (white pegs).
    partial_matches: u8,
}

impl GuessAttempt {
    /// Returns `true` when every digit is an exact match.
    pub fn is_solution(&self) -> bool {
        usize::from(self.exact_matches) == CODE_LENGTH
    }
}

/// Client-side view of one remote game.
///
/// Attempts are append-only and in chronological order. `completed` is set
/// exactly when the last attempt is a solution, so nothing may be appended
/// after that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    session_id: Option<String>,
    attempts: Vec<GuessAttempt>,
    completed: bool,
}

impl GameSession {
    /// Creates an empty session with no id yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session id issued by the server, if one has been assigned.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Scored guesses, oldest first.
    pub fn attempts(&self) -> &[GuessAttempt] {
        &self.attempts
    }

    /// Whether the code has been cracked.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// The most recent attempt.
    pub fn last_attempt(&self) -> Option<&GuessAttempt> {
        self.attempts.last()
    }

    /// Number of attempts it took, once completed.
    pub fn solved_in(&self) -> Option<usize> {
        self.completed.then_some(self.attempts.len())
    }

    /// Assigns the server-issued id. Returns `false` if one was already set.
    #[instrument(skip(self))]
    pub fn assign_id(&mut self, session_id: String) -> bool {
        if let Some(existing) = &self.session_id {
            warn!(existing = %existing, "Session id already assigned");
            return false;
        }
        self.session_id = Some(session_id);
        true
    }

    /// Appends a scored attempt and updates the completion flag.
    ///
    /// Returns `false` (and records nothing) if the session is already
    /// completed.
    #[instrument(skip(self), fields(session_id = ?self.session_id))]
    pub fn record(&mut self, attempt: GuessAttempt) -> bool {
        if self.completed {
            warn!("Attempt recorded after completion, ignoring");
            return false;
        }
        self.completed = attempt.is_solution();
        self.attempts.push(attempt);
        debug!(
            attempts = self.attempts.len(),
            completed = self.completed,
            "Recorded attempt"
        );
        true
    }
}
