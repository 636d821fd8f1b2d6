//! HTTP implementation of [`RemoteGameService`].

use async_trait::async_trait;
use derive_getters::Getters;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, instrument, warn};

use crate::error::ServiceError;
use crate::game::{CreatedGame, GuessFeedback, RemoteGameService};

/// Public Mastermind server.
pub const DEFAULT_SERVER_URL: &str = "https://mastermind.darkube.app";

/// Body of `POST /game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameResponse {
    /// Id of the new game.
    pub game_id: String,
}

/// Body sent to `POST /guess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Game to guess in.
    pub game_id: String,
    /// The 4-digit guess.
    pub guess: String,
}

/// Body of `POST /guess`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// Black pegs.
    pub black: u8,
    /// White pegs.
    pub white: u8,
}

/// Error body returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// HTTP client for the Mastermind server.
#[derive(Debug, Clone, Getters)]
pub struct HttpGameClient {
    /// Base URL of the server, without a trailing slash.
    base_url: String,
    /// HTTP client.
    #[getter(skip)]
    client: reqwest::Client,
}

impl HttpGameClient {
    /// Creates a client for the given server.
    #[instrument(skip_all)]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Creating HTTP game client");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and turns transport failures into [`ServiceError`].
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, Vec<u8>), ServiceError> {
        let response = request
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                ServiceError::transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, status = %status, "Failed to read response body");
            ServiceError::transport(e.to_string())
        })?;
        debug!(status = %status, bytes = body.len(), "Received response");
        Ok((status, body.to_vec()))
    }
}

/// Maps an error status to [`ServiceError`], preferring the server's message.
#[instrument(skip(body))]
fn rejection(status: StatusCode, body: &[u8]) -> ServiceError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(err) => {
            warn!(status = %status, error = %err.error, "Server rejected request");
            ServiceError::rejected(err.error)
        }
        Err(_) => {
            warn!(
                status = %status,
                body = %String::from_utf8_lossy(body),
                "Server error without an error payload"
            );
            ServiceError::InvalidResponse {
                status: status.as_u16(),
            }
        }
    }
}

/// Decodes a successful response body.
#[instrument(skip(body))]
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ServiceError> {
    if status.is_client_error() || status.is_server_error() {
        return Err(rejection(status, body));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        warn!(status = %status, "Empty response body");
        return Err(ServiceError::NoData);
    }
    serde_json::from_slice(body).map_err(|e| {
        error!(
            error = %e,
            response_data = %String::from_utf8_lossy(body),
            "Failed to decode response"
        );
        ServiceError::decoding(e.to_string())
    })
}

#[async_trait]
impl RemoteGameService for HttpGameClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn create_game(&self) -> Result<CreatedGame, ServiceError> {
        let (status, body) = self.send(self.client.post(self.url("/game"))).await?;
        let created: CreateGameResponse = decode_body(status, &body)?;
        info!(game_id = %created.game_id, "Create game successful");
        Ok(CreatedGame::new(created.game_id))
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn make_guess(
        &self,
        session_id: &str,
        code: &str,
    ) -> Result<GuessFeedback, ServiceError> {
        let request = GuessRequest {
            game_id: session_id.to_string(),
            guess: code.to_string(),
        };
        let (status, body) = self
            .send(self.client.post(self.url("/guess")).json(&request))
            .await?;
        let scored: GuessResponse = decode_body(status, &body)?;
        info!(
            game_id = %session_id,
            guess = %code,
            black = scored.black,
            white = scored.white,
            "Make guess successful"
        );
        Ok(GuessFeedback::new(scored.black, scored.white))
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn delete_game(&self, session_id: &str) -> Result<(), ServiceError> {
        let path = format!("/game/{}", session_id);
        let (status, body) = self.send(self.client.delete(self.url(&path))).await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(rejection(status, &body));
        }
        info!(game_id = %session_id, "Delete game successful");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = HttpGameClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/game"), "http://localhost:8080/game");
    }

    #[test]
    fn error_payload_becomes_rejection() {
        let err = rejection(StatusCode::BAD_REQUEST, br#"{"error":"invalid guess"}"#);
        assert_eq!(err, ServiceError::rejected("invalid guess"));
        assert_eq!(err.to_string(), "API Error: invalid guess");
    }

    #[test]
    fn unreadable_error_payload_keeps_status() {
        let err = rejection(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(err, ServiceError::InvalidResponse { status: 502 });
    }

    #[test]
    fn empty_success_body_is_no_data() {
        let result: Result<GuessResponse, _> = decode_body(StatusCode::OK, b"  ");
        assert_eq!(result, Err(ServiceError::NoData));
    }

    #[test]
    fn malformed_success_body_is_decoding_error() {
        let result: Result<GuessResponse, _> = decode_body(StatusCode::OK, br#"{"black":"x"}"#);
        assert!(matches!(result, Err(ServiceError::Decoding { .. })));
    }

    #[test]
    fn guess_response_decodes() {
        let result: Result<GuessResponse, _> =
            decode_body(StatusCode::OK, br#"{"black":1,"white":2}"#);
        assert_eq!(result, Ok(GuessResponse { black: 1, white: 2 }));
    }
}
