//! Remote scoring service boundary.

use async_trait::async_trait;
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// A freshly created remote game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct CreatedGame {
    /// Opaque id issued by the server.
    pub session_id: String,
}

/// Peg feedback for a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct GuessFeedback {
    /// Black pegs.
    pub exact_matches: u8,
    /// White pegs.
    pub partial_matches: u8,
}

/// The server that holds the secret code and scores guesses.
///
/// Calls may suspend for as long as the transport takes. Implementations must
/// not retry on their own: a guess that failed in transit may or may not have
/// been counted server-side.
#[async_trait]
pub trait RemoteGameService: Send + Sync {
    /// Creates a new game and returns its id.
    async fn create_game(&self) -> Result<CreatedGame, ServiceError>;

    /// Submits a guess for scoring.
    async fn make_guess(
        &self,
        session_id: &str,
        code: &str,
    ) -> Result<GuessFeedback, ServiceError>;

    /// Deletes a game on the server.
    async fn delete_game(&self, session_id: &str) -> Result<(), ServiceError>;
}
