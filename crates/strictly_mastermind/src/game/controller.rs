//! Game session controller — the state machine behind the game screen.
//!
//! The controller owns the one [`GameSession`] and is the only writer to it.
//! Each intent checks the stage under the lock, releases the lock while the
//! remote call is in flight, and re-applies the response only if nothing has
//! reset the controller in the meantime.

use std::sync::{Mutex, MutexGuard, PoisonError};

use derive_getters::Getters;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use super::service::RemoteGameService;
use super::session::{GameSession, GuessAttempt};
use super::validator::validate_guess;

/// Fine-grained controller stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Stage {
    /// No game yet; `start_game` is allowed.
    #[default]
    Uninitialized,
    /// Waiting for the server to create a game.
    Creating,
    /// Game running, ready for the next guess.
    AwaitingGuess,
    /// Waiting for the server to score a guess.
    Submitting,
    /// Code cracked. Only `reset` leaves this stage.
    Finished,
}

/// Stage as the view sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ViewStage {
    /// Before a game exists (possibly while one is being created).
    PreGame,
    /// In game, ready for input.
    InGameWaiting,
    /// In game, a guess is being scored.
    InGameBusy,
    /// Game over.
    Finished,
}

impl Stage {
    /// Collapses the stage into what the view renders.
    pub fn view_stage(self) -> ViewStage {
        match self {
            Self::Uninitialized | Self::Creating => ViewStage::PreGame,
            Self::AwaitingGuess => ViewStage::InGameWaiting,
            Self::Submitting => ViewStage::InGameBusy,
            Self::Finished => ViewStage::Finished,
        }
    }

    /// Whether a remote call is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Creating | Self::Submitting)
    }
}

/// What happened to an intent forwarded into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum IntentOutcome {
    /// The intent completed and its effect was applied.
    Applied,
    /// The remote call failed; the stage was rolled back.
    Failed,
    /// The guess failed local validation; nothing was sent.
    Invalid,
    /// The intent is not allowed in the current stage; nothing changed.
    Rejected,
    /// The response arrived after an abandon or reset and was dropped.
    Stale,
}

/// Immutable view of the controller after a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct ControllerSnapshot {
    /// Fine-grained stage.
    stage: Stage,
    /// Copy of the current session.
    session: GameSession,
    /// Current error message, empty when none.
    error_message: String,
    /// Last submitted raw guess, cleared after a scored non-winning guess.
    guess_input: String,
}

impl ControllerSnapshot {
    /// Stage as the view renders it.
    pub fn view_stage(&self) -> ViewStage {
        self.stage.view_stage()
    }

    /// Whether there is an error to show.
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    stage: Stage,
    session: GameSession,
    error_message: String,
    guess_input: String,
    /// Bumped by `abandon` and `reset` so in-flight responses can tell they
    /// belong to a discarded session.
    epoch: u64,
}

impl ControllerState {
    fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            stage: self.stage,
            session: self.session.clone(),
            error_message: self.error_message.clone(),
            guess_input: self.guess_input.clone(),
        }
    }

    fn discard_session(&mut self) -> GameSession {
        self.epoch += 1;
        self.stage = Stage::Uninitialized;
        self.error_message.clear();
        self.guess_input.clear();
        std::mem::take(&mut self.session)
    }
}

/// Drives one game session against a [`RemoteGameService`].
///
/// Share it behind an `Arc`; all intents take `&self`. Only one mutating call
/// per operation class can be in flight because every intent requires an
/// exact stage and moves out of it before suspending.
pub struct GameSessionController<S> {
    service: S,
    state: Mutex<ControllerState>,
    updates: watch::Sender<ControllerSnapshot>,
}

impl<S: RemoteGameService> GameSessionController<S> {
    /// Creates a controller in [`Stage::Uninitialized`].
    #[instrument(skip(service))]
    pub fn new(service: S) -> Self {
        info!("Creating GameSessionController");
        let (updates, _) = watch::channel(ControllerSnapshot::default());
        Self {
            service,
            state: Mutex::new(ControllerState::default()),
            updates,
        }
    }

    /// The remote service this controller talks to.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Current state.
    pub fn snapshot(&self) -> ControllerSnapshot {
        self.lock().snapshot()
    }

    /// Current fine-grained stage.
    pub fn stage(&self) -> Stage {
        self.lock().stage
    }

    /// Receiver that yields a new snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.updates.subscribe()
    }

    /// Creates a remote game. Allowed only from [`Stage::Uninitialized`].
    #[instrument(skip(self))]
    pub async fn start_game(&self) -> IntentOutcome {
        let epoch = {
            let mut state = self.lock();
            if state.stage != Stage::Uninitialized {
                debug!(stage = %state.stage, "start_game rejected");
                return IntentOutcome::Rejected;
            }
            state.stage = Stage::Creating;
            self.publish(&state);
            state.epoch
        };

        info!("Creating remote game");
        let result = self.service.create_game().await;

        let orphan = {
            let mut state = self.lock();
            if state.epoch != epoch || state.stage != Stage::Creating {
                debug!(stage = %state.stage, "Discarding stale create response");
                result.ok().map(|created| created.session_id)
            } else {
                match result {
                    Ok(created) => {
                        info!(session_id = %created.session_id, "Game created");
                        state.session = GameSession::new();
                        state.session.assign_id(created.session_id);
                        state.error_message.clear();
                        state.guess_input.clear();
                        state.stage = Stage::AwaitingGuess;
                        self.publish(&state);
                        return IntentOutcome::Applied;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to create game");
                        state.error_message = format!("Error creating game: {}", e);
                        state.stage = Stage::Uninitialized;
                        self.publish(&state);
                        return IntentOutcome::Failed;
                    }
                }
            }
        };

        // The game was created for a screen that has since been left.
        if let Some(session_id) = orphan {
            self.delete_best_effort(&session_id).await;
        }
        IntentOutcome::Stale
    }

    /// Validates and submits a guess. Allowed only from
    /// [`Stage::AwaitingGuess`].
    #[instrument(skip(self))]
    pub async fn submit_guess(&self, raw: &str) -> IntentOutcome {
        let (epoch, session_id, code) = {
            let mut state = self.lock();
            if state.stage != Stage::AwaitingGuess {
                debug!(stage = %state.stage, "submit_guess rejected");
                return IntentOutcome::Rejected;
            }
            let Some(session_id) = state.session.session_id().map(str::to_owned) else {
                warn!("Awaiting a guess without a session id");
                return IntentOutcome::Rejected;
            };

            state.guess_input = raw.to_string();
            let code = match validate_guess(raw) {
                Ok(code) => code,
                Err(e) => {
                    debug!(error = %e, "Guess failed validation");
                    state.error_message = e.to_string();
                    self.publish(&state);
                    return IntentOutcome::Invalid;
                }
            };

            state.error_message.clear();
            state.stage = Stage::Submitting;
            self.publish(&state);
            (state.epoch, session_id, code)
        };

        info!(session_id = %session_id, guess = %code, "Submitting guess");
        let result = self.service.make_guess(&session_id, code.as_str()).await;

        let mut state = self.lock();
        if state.epoch != epoch || state.stage != Stage::Submitting {
            debug!(stage = %state.stage, "Discarding stale guess response");
            return IntentOutcome::Stale;
        }

        match result {
            Ok(feedback) => {
                let attempt = GuessAttempt::new(
                    code.into_inner(),
                    feedback.exact_matches,
                    feedback.partial_matches,
                );
                state.session.record(attempt);
                if state.session.completed() {
                    info!(
                        attempts = state.session.attempts().len(),
                        "Code cracked"
                    );
                    state.stage = Stage::Finished;
                } else {
                    debug!(
                        black = feedback.exact_matches,
                        white = feedback.partial_matches,
                        "Guess scored"
                    );
                    state.guess_input.clear();
                    state.stage = Stage::AwaitingGuess;
                }
                self.publish(&state);
                IntentOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "Guess failed");
                state.error_message = format!("Error making guess: {}", e);
                state.stage = Stage::AwaitingGuess;
                self.publish(&state);
                IntentOutcome::Failed
            }
        }
    }

    /// Leaves the current game and returns to [`Stage::Uninitialized`].
    ///
    /// Allowed from every stage except [`Stage::Finished`]. The remote game
    /// is deleted best-effort; failures are logged and never surfaced.
    #[instrument(skip(self))]
    pub async fn abandon(&self) -> IntentOutcome {
        let session = {
            let mut state = self.lock();
            if state.stage == Stage::Finished {
                debug!("abandon rejected in Finished, use reset");
                return IntentOutcome::Rejected;
            }
            info!(stage = %state.stage, "Abandoning game");
            let session = state.discard_session();
            self.publish(&state);
            session
        };

        if let Some(session_id) = session.session_id() {
            self.delete_best_effort(session_id).await;
        }
        IntentOutcome::Applied
    }

    /// Clears a finished game. Allowed only from [`Stage::Finished`].
    #[instrument(skip(self))]
    pub fn reset(&self) -> IntentOutcome {
        let mut state = self.lock();
        if state.stage != Stage::Finished {
            debug!(stage = %state.stage, "reset rejected");
            return IntentOutcome::Rejected;
        }
        info!("Resetting finished game");
        state.discard_session();
        self.publish(&state);
        IntentOutcome::Applied
    }

    async fn delete_best_effort(&self, session_id: &str) {
        match self.service.delete_game(session_id).await {
            Ok(()) => debug!(session_id = %session_id, "Remote game deleted"),
            Err(e) => warn!(session_id = %session_id, error = %e, "Failed to delete remote game"),
        }
    }

    fn publish(&self, state: &ControllerState) {
        self.updates.send_replace(state.snapshot());
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_collapse_for_the_view() {
        assert_eq!(Stage::Uninitialized.view_stage(), ViewStage::PreGame);
        assert_eq!(Stage::Creating.view_stage(), ViewStage::PreGame);
        assert_eq!(Stage::AwaitingGuess.view_stage(), ViewStage::InGameWaiting);
        assert_eq!(Stage::Submitting.view_stage(), ViewStage::InGameBusy);
        assert_eq!(Stage::Finished.view_stage(), ViewStage::Finished);
    }

    #[test]
    fn only_network_stages_are_busy() {
        assert!(Stage::Creating.is_busy());
        assert!(Stage::Submitting.is_busy());
        assert!(!Stage::Uninitialized.is_busy());
        assert!(!Stage::AwaitingGuess.is_busy());
        assert!(!Stage::Finished.is_busy());
    }
}
