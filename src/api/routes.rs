//! HTTP handlers for the game endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::api::{ApiError, AppState, GameResource, RoundResource};
use crate::games::roshambo::Choice;

/// Request body for creating a game.
///
/// Fields are optional so that missing keys surface as field-level
/// validation errors rather than deserialization rejections. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGameRequest {
    /// Name of the first player.
    #[serde(default)]
    pub player1_name: Option<String>,
    /// Name of the second player.
    #[serde(default)]
    pub player2_name: Option<String>,
}

/// Request body for creating a round.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoundRequest {
    /// First player's choice.
    #[serde(default)]
    pub player1_choice: Option<String>,
    /// Second player's choice.
    #[serde(default)]
    pub player2_choice: Option<String>,
}

/// Validates a name field: present and non-blank.
fn required_name(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    let value = value.ok_or(ApiError::Validation {
        field,
        message: "this field is required".to_string(),
    })?;
    if value.trim().is_empty() {
        return Err(ApiError::Validation {
            field,
            message: "this field may not be blank".to_string(),
        });
    }
    Ok(value)
}

/// Validates a choice field: present and one of rock/paper/scissors.
fn required_choice(value: Option<String>, field: &'static str) -> Result<Choice, ApiError> {
    let value = value.ok_or(ApiError::Validation {
        field,
        message: "this field is required".to_string(),
    })?;
    value
        .parse::<Choice>()
        .map_err(|e| ApiError::InvalidChoice {
            field,
            value: e.value,
        })
}

/// POST /game/new/ - creates a game between two named players.
#[instrument(skip_all)]
pub async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> Result<(StatusCode, Json<GameResource>), ApiError> {
    let player1_name = required_name(req.player1_name, "player1_name")?;
    let player2_name = required_name(req.player2_name, "player2_name")?;

    debug!(player1 = %player1_name, player2 = %player2_name, "Creating game");
    let detail = state.service().create_game(&player1_name, &player2_name)?;

    info!(game_id = %detail.game().id(), "Game created");
    Ok((StatusCode::CREATED, Json(GameResource::from(&detail))))
}

/// GET /game/{game_id}/ - fetches one game with its rounds.
#[instrument(skip_all, fields(game_id = %game_id))]
pub async fn game_detail(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResource>, ApiError> {
    let detail = state.service().get_game(&game_id)?;
    Ok(Json(GameResource::from(&detail)))
}

/// POST /game/{game_id}/rounds/new/ - plays the next round of a game.
#[instrument(skip_all, fields(game_id = %game_id))]
pub async fn create_round(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(req): Json<NewRoundRequest>,
) -> Result<(StatusCode, Json<RoundResource>), ApiError> {
    // Unknown and finished games outrank body validation. The creation
    // transaction re-checks both against the live row.
    state.service().ensure_game_open(&game_id)?;

    let player1_choice = required_choice(req.player1_choice, "player1_choice")?;
    let player2_choice = required_choice(req.player2_choice, "player2_choice")?;

    let detail = state
        .service()
        .create_round(&game_id, player1_choice, player2_choice)?;

    info!(
        round_number = detail.round().round_number(),
        winner = ?detail.round().round_winner_id(),
        "Round created"
    );
    Ok((StatusCode::CREATED, Json(RoundResource::from(&detail))))
}

/// GET /game/ - lists all games in creation order.
#[instrument(skip_all)]
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameResource>>, ApiError> {
    let games = state.service().list_games()?;
    let resources = games.iter().map(GameResource::from).collect();
    Ok(Json(resources))
}
