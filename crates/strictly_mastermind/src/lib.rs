//! Strictly Mastermind - terminal client for a remote Mastermind server.
//!
//! The server holds the secret code and scores guesses; this crate creates a
//! game, validates and submits guesses, and renders black/white peg feedback
//! until the code is cracked or the game is abandoned.
//!
//! # Architecture
//!
//! - **Game**: session entity, guess validation, and the
//!   [`GameSessionController`] state machine
//! - **Service**: the [`RemoteGameService`] boundary and its HTTP
//!   implementation, [`HttpGameClient`]
//! - **TUI**: ratatui screens that render controller snapshots and forward
//!   user intents
//!
//! # Example
//!
//! ```no_run
//! use strictly_mastermind::{GameSessionController, HttpGameClient, Stage};
//!
//! # async fn example() {
//! let controller = GameSessionController::new(HttpGameClient::new("http://localhost:8080"));
//! controller.start_game().await;
//! if controller.stage() == Stage::AwaitingGuess {
//!     controller.submit_guess("1234").await;
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod error;
mod game;
mod http_client;
mod logging;
pub mod tui;

// Crate-level exports - Game core
pub use game::{
    CODE_LENGTH, ControllerSnapshot, CreatedGame, GameSession, GameSessionController, GuessAttempt,
    GuessCode, GuessFeedback, INVALID_GUESS_MESSAGE, IntentOutcome, RemoteGameService, Stage,
    ViewStage, is_valid_guess, validate_guess,
};

// Crate-level exports - Errors
pub use error::{ConfigError, ServiceError, ValidationError};

// Crate-level exports - HTTP client
pub use http_client::{
    CreateGameResponse, DEFAULT_SERVER_URL, ErrorResponse, GuessRequest, GuessResponse,
    HttpGameClient,
};

// Crate-level exports - Configuration and logging
pub use config::{ClientConfig, LOG_FILE_ENV, SERVER_URL_ENV};
pub use logging::init_file_logging;
