//! Local guess validation.
//!
//! Only the shape of a guess is checked here: exactly [`CODE_LENGTH`] decimal
//! digits. Whether each digit falls in the server's alphabet is left to the
//! server.

use derive_more::Display;
use tracing::{debug, instrument};

use crate::error::ValidationError;

/// Number of digits in a secret code.
pub const CODE_LENGTH: usize = 4;

/// User-facing message for malformed guesses.
pub const INVALID_GUESS_MESSAGE: &str = "Please enter a valid 4-digit number";

/// A guess that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct GuessCode(String);

impl GuessCode {
    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validates raw user input as a guess.
#[instrument]
pub fn validate_guess(raw: &str) -> Result<GuessCode, ValidationError> {
    let length = raw.chars().count();
    if length != CODE_LENGTH {
        debug!(length, "Guess has wrong length");
        return Err(ValidationError::new(INVALID_GUESS_MESSAGE, raw));
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        debug!("Guess contains a non-digit character");
        return Err(ValidationError::new(INVALID_GUESS_MESSAGE, raw));
    }
    Ok(GuessCode(raw.to_string()))
}

/// Returns `true` when `raw` would pass [`validate_guess`].
pub fn is_valid_guess(raw: &str) -> bool {
    validate_guess(raw).is_ok()
}
