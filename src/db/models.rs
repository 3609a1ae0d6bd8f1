//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::roshambo::{Choice, RoundOutcome};

/// Player database model.
///
/// Players are created on first reference by name and never deleted by
/// the service. `score` counts games won.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::players)]
pub struct Player {
    id: String,
    name: String,
    score: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable player model.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayer {
    id: String,
    name: String,
}

/// Game database model.
///
/// A game pairs two distinct players and is open until one of them
/// accumulates [`Game::WIN_THRESHOLD`] round wins, at which point
/// `winner_id` and `finished_at` are set together, exactly once.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct Game {
    id: String,
    player1_id: String,
    player2_id: String,
    winner_id: Option<String>,
    created_at: NaiveDateTime,
    finished_at: Option<NaiveDateTime>,
}

impl Game {
    /// Number of round wins that ends a game.
    pub const WIN_THRESHOLD: usize = 3;

    /// Whether the game has concluded.
    pub fn is_finished(&self) -> bool {
        self.winner_id.is_some() || self.finished_at.is_some()
    }

    /// Maps a round outcome onto this game's player references.
    ///
    /// Returns the winning player's id, or `None` for a draw.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn round_winner_id(&self, outcome: RoundOutcome) -> Option<&str> {
        match outcome {
            RoundOutcome::FirstWins => Some(self.player1_id.as_str()),
            RoundOutcome::SecondWins => Some(self.player2_id.as_str()),
            RoundOutcome::Draw => None,
        }
    }

    /// Decides whether either player has taken the game.
    ///
    /// Counts round wins per player over the given rounds and returns the
    /// id of the player holding at least [`Game::WIN_THRESHOLD`], or `None`
    /// while the game remains open. Pure; callers persist the decision.
    #[instrument(skip(self, rounds), fields(game_id = %self.id, rounds = rounds.len()))]
    pub fn decide_winner(&self, rounds: &[Round]) -> Option<&str> {
        if rounds.is_empty() {
            return None;
        }

        let wins = |player_id: &str| {
            rounds
                .iter()
                .filter(|r| r.round_winner_id.as_deref() == Some(player_id))
                .count()
        };

        if wins(&self.player1_id) >= Self::WIN_THRESHOLD {
            Some(self.player1_id.as_str())
        } else if wins(&self.player2_id) >= Self::WIN_THRESHOLD {
            Some(self.player2_id.as_str())
        } else {
            None
        }
    }
}

/// Insertable game model.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGame {
    id: String,
    player1_id: String,
    player2_id: String,
}

/// Round database model.
///
/// Rounds are immutable once created: choices and `round_winner_id` are
/// written at creation and never revised.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::rounds)]
#[diesel(belongs_to(Game))]
pub struct Round {
    id: String,
    game_id: String,
    round_number: i32,
    player1_choice: String,
    player2_choice: String,
    round_winner_id: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Round {
    /// Parses the stored choice strings back into [`Choice`] values.
    #[instrument(skip(self), fields(round_id = %self.id))]
    pub fn parse_choices(&self) -> Result<(Choice, Choice), DbError> {
        let p1 = self
            .player1_choice
            .parse::<Choice>()
            .map_err(|e| DbError::new(e.to_string()))?;
        let p2 = self
            .player2_choice
            .parse::<Choice>()
            .map_err(|e| DbError::new(e.to_string()))?;
        Ok((p1, p2))
    }
}

/// Insertable round model, written already resolved.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::rounds)]
pub struct NewRound {
    id: String,
    game_id: String,
    round_number: i32,
    player1_choice: String,
    player2_choice: String,
    round_winner_id: Option<String>,
}
