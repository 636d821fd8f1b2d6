//! Mastermind game core: session entity, guess validation, remote service
//! boundary, and the controller that sequences them.

mod controller;
mod service;
mod session;
mod validator;

pub use controller::{ControllerSnapshot, GameSessionController, IntentOutcome, Stage, ViewStage};
pub use service::{CreatedGame, GuessFeedback, RemoteGameService};
pub use session::{GameSession, GuessAttempt};
pub use validator::{CODE_LENGTH, GuessCode, INVALID_GUESS_MESSAGE, is_valid_guess, validate_guess};
