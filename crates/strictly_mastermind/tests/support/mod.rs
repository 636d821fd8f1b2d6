//! Scripted in-memory game service for controller tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use strictly_mastermind::{CreatedGame, GuessFeedback, RemoteGameService, ServiceError};
use tokio::sync::Notify;

/// A recorded call against the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Guess { session_id: String, code: String },
    Delete { session_id: String },
}

/// Holds a call inside the service until the test releases it.
#[derive(Debug, Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Service that replays queued responses and records every call.
#[derive(Debug, Default)]
pub struct ScriptedService {
    creates: Mutex<VecDeque<Result<CreatedGame, ServiceError>>>,
    guesses: Mutex<VecDeque<Result<GuessFeedback, ServiceError>>>,
    deletes: Mutex<VecDeque<Result<(), ServiceError>>>,
    calls: Mutex<Vec<Call>>,
    create_gate: Mutex<Option<Arc<Gate>>>,
    guess_gate: Mutex<Option<Arc<Gate>>>,
    delete_gate: Mutex<Option<Arc<Gate>>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(self, result: Result<CreatedGame, ServiceError>) -> Self {
        self.creates.lock().unwrap().push_back(result);
        self
    }

    pub fn with_game(self, id: &str) -> Self {
        self.with_create(Ok(CreatedGame::new(id.to_string())))
    }

    pub fn with_guess(self, result: Result<GuessFeedback, ServiceError>) -> Self {
        self.guesses.lock().unwrap().push_back(result);
        self
    }

    pub fn with_score(self, black: u8, white: u8) -> Self {
        self.with_guess(Ok(GuessFeedback::new(black, white)))
    }

    pub fn with_delete(self, result: Result<(), ServiceError>) -> Self {
        self.deletes.lock().unwrap().push_back(result);
        self
    }

    pub fn gate_create(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.create_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn gate_guess(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.guess_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn gate_delete(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.delete_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn guess_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Guess { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn pass_gate(gate: Option<Arc<Gate>>) {
    if let Some(gate) = gate {
        gate.entered.notify_one();
        gate.release.notified().await;
    }
}

#[async_trait]
impl RemoteGameService for ScriptedService {
    async fn create_game(&self) -> Result<CreatedGame, ServiceError> {
        self.record(Call::Create);
        let gate = self.create_gate.lock().unwrap().take();
        pass_gate(gate).await;
        self.creates
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::transport("no scripted create")))
    }

    async fn make_guess(
        &self,
        session_id: &str,
        code: &str,
    ) -> Result<GuessFeedback, ServiceError> {
        self.record(Call::Guess {
            session_id: session_id.to_string(),
            code: code.to_string(),
        });
        let gate = self.guess_gate.lock().unwrap().take();
        pass_gate(gate).await;
        self.guesses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::transport("no scripted guess")))
    }

    async fn delete_game(&self, session_id: &str) -> Result<(), ServiceError> {
        self.record(Call::Delete {
            session_id: session_id.to_string(),
        });
        let gate = self.delete_gate.lock().unwrap().take();
        pass_gate(gate).await;
        self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}
