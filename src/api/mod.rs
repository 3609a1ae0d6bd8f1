//! REST API surface.
//!
//! Axum-based HTTP API: create games, play rounds, fetch one or many
//! games. Errors are rendered as `{detail, code}` bodies.

mod resources;
mod routes;
mod state;

pub use resources::{ErrorDetail, GameResource, PlayerResource, RoundResource};
pub use routes::{NewGameRequest, NewRoundRequest};
pub use state::AppState;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use derive_more::{Display, Error};
use tracing::error;

use crate::service::GameError;

/// Builds the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/game/", get(routes::list_games))
        .route("/game/new/", post(routes::create_game))
        .route("/game/{game_id}/", get(routes::game_detail))
        .route("/game/{game_id}/rounds/new/", post(routes::create_round))
        .with_state(state)
}

/// API error mapped to an HTTP status and a `{detail, code}` body.
#[derive(Debug, Clone, Display, Error)]
pub enum ApiError {
    /// A required field is missing or blank.
    #[display("{field}: {message}")]
    Validation {
        /// Name of the offending request field.
        field: &'static str,
        /// Human-readable problem description.
        message: String,
    },
    /// The two player names are equal (ignoring case).
    #[display("Player names must be different.")]
    DuplicatePlayerNames,
    /// A choice field holds a value outside rock/paper/scissors.
    #[display("{field}: '{value}' is not a valid choice")]
    InvalidChoice {
        /// Name of the offending request field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// No game with the requested id.
    #[display("Game not found")]
    GameNotFound,
    /// The game already concluded.
    #[display("Cannot create a new round for a finished game")]
    GameFinished,
    /// Unexpected persistence failure.
    #[display("Internal server error")]
    Internal(#[error(not(source))] String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::DuplicatePlayerNames
            | Self::InvalidChoice { .. }
            | Self::GameFinished => StatusCode::BAD_REQUEST,
            Self::GameNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::DuplicatePlayerNames => "duplicate_player_names",
            Self::InvalidChoice { .. } => "invalid_choice",
            Self::GameNotFound => "game_not_found",
            Self::GameFinished => "game_finished",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref detail) = self {
            error!(detail = %detail, "Internal error");
        }

        let body = ErrorDetail {
            detail: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::DuplicatePlayerNames => Self::DuplicatePlayerNames,
            GameError::GameNotFound => Self::GameNotFound,
            GameError::GameFinished => Self::GameFinished,
            GameError::Db(e) => Self::Internal(e.to_string()),
        }
    }
}
