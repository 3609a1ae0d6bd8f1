//! Serializable API resources.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::db::Player;
use crate::service::{GameDetail, RoundDetail};

/// Player as exposed on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResource {
    /// Player id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Games won.
    pub score: i32,
}

impl From<&Player> for PlayerResource {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().clone(),
            name: player.name().clone(),
            score: *player.score(),
        }
    }
}

/// Round as exposed on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResource {
    /// Round id.
    pub id: String,
    /// 1-based position of this round within its game.
    pub round_number: i32,
    /// First player's choice.
    pub player1_choice: String,
    /// Second player's choice.
    pub player2_choice: String,
    /// Winning player, or `null` for a draw.
    pub round_winner: Option<PlayerResource>,
    /// Id of the owning game.
    pub game: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last-update timestamp.
    pub updated_at: NaiveDateTime,
}

impl From<&RoundDetail> for RoundResource {
    fn from(detail: &RoundDetail) -> Self {
        let round = detail.round();
        Self {
            id: round.id().clone(),
            round_number: *round.round_number(),
            player1_choice: round.player1_choice().clone(),
            player2_choice: round.player2_choice().clone(),
            round_winner: detail.round_winner().as_ref().map(PlayerResource::from),
            game: round.game_id().clone(),
            created_at: *round.created_at(),
            updated_at: *round.updated_at(),
        }
    }
}

/// Game as exposed on the wire, with its full round history.
#[derive(Debug, Clone, Serialize)]
pub struct GameResource {
    /// Game id.
    pub id: String,
    /// First player.
    pub player1: PlayerResource,
    /// Second player.
    pub player2: PlayerResource,
    /// Winning player, or `null` while the game is open.
    pub winner: Option<PlayerResource>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Completion timestamp, or `null` while the game is open.
    pub finished_at: Option<NaiveDateTime>,
    /// Rounds in round-number order.
    pub rounds: Vec<RoundResource>,
}

impl From<&GameDetail> for GameResource {
    fn from(detail: &GameDetail) -> Self {
        let game = detail.game();
        Self {
            id: game.id().clone(),
            player1: PlayerResource::from(detail.player1()),
            player2: PlayerResource::from(detail.player2()),
            winner: detail.winner().as_ref().map(PlayerResource::from),
            created_at: *game.created_at(),
            finished_at: *game.finished_at(),
            rounds: detail.rounds().iter().map(RoundResource::from).collect(),
        }
    }
}

/// Error body: `{detail, code}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Human-readable error message.
    pub detail: String,
    /// Machine-readable error code.
    pub code: String,
}
