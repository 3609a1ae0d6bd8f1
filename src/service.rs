//! Game orchestration business logic layer.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

use crate::db::{DbError, Game, GameRepository, Player, Round, RoundError};
use crate::games::roshambo::Choice;

/// Errors surfaced by the game service.
#[derive(Debug, Clone, Display, Error)]
pub enum GameError {
    /// The two submitted player names refer to the same player.
    #[display("Player names must be different.")]
    DuplicatePlayerNames,
    /// No game exists with the requested id.
    #[display("Game not found")]
    GameNotFound,
    /// The game already has a winner; no further rounds may be created.
    #[display("Cannot create a new round for a finished game")]
    GameFinished,
    /// Underlying persistence failure.
    #[display("{_0}")]
    Db(DbError),
}

impl From<DbError> for GameError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

impl From<RoundError> for GameError {
    fn from(err: RoundError) -> Self {
        match err {
            RoundError::GameNotFound => Self::GameNotFound,
            RoundError::GameFinished => Self::GameFinished,
            RoundError::Db(e) => Self::Db(e),
        }
    }
}

/// A round with its winning player attached.
#[derive(Debug, Clone, Getters)]
pub struct RoundDetail {
    round: Round,
    round_winner: Option<Player>,
}

/// A game with its players and round history attached.
#[derive(Debug, Clone, Getters)]
pub struct GameDetail {
    game: Game,
    player1: Player,
    player2: Player,
    winner: Option<Player>,
    rounds: Vec<RoundDetail>,
}

/// Service layer for game operations.
///
/// Wraps [`GameRepository`] with higher-level business logic:
/// lookup-or-create player semantics, duplicate-name validation, and
/// assembly of games with their players and rounds.
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
}

impl GameService {
    /// Creates a new game service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating GameService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Returns an existing player by name or creates one if not found.
    ///
    /// The lookup is case-insensitive; the stored casing is whatever the
    /// first creation supplied.
    #[instrument(skip(self))]
    pub fn get_or_create_player(&self, name: &str) -> Result<Player, GameError> {
        debug!(name = %name, "Getting or creating player");

        if let Some(player) = self.repository.get_player_by_name(name)? {
            info!(player_id = %player.id(), "Existing player found");
            return Ok(player);
        }

        info!(name = %name, "Creating new player");
        Ok(self.repository.create_player(name.to_string())?)
    }

    /// Creates a new game between the two named players.
    ///
    /// Players are looked up or created by name.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DuplicatePlayerNames`] if the names are equal
    /// ignoring case, or [`GameError::Db`] on persistence failure.
    #[instrument(skip(self))]
    pub fn create_game(
        &self,
        player1_name: &str,
        player2_name: &str,
    ) -> Result<GameDetail, GameError> {
        debug!(player1 = %player1_name, player2 = %player2_name, "Creating game");

        if player1_name.to_lowercase() == player2_name.to_lowercase() {
            return Err(GameError::DuplicatePlayerNames);
        }

        let player1 = self.get_or_create_player(player1_name)?;
        let player2 = self.get_or_create_player(player2_name)?;

        let game = self.repository.create_game(player1.id(), player2.id())?;

        info!(game_id = %game.id(), "Game created");
        Ok(GameDetail {
            game,
            player1,
            player2,
            winner: None,
            rounds: Vec::new(),
        })
    }

    /// Checks that a game exists and is still open.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameNotFound`] for an unknown id and
    /// [`GameError::GameFinished`] if the game already concluded.
    #[instrument(skip(self))]
    pub fn ensure_game_open(&self, game_id: &str) -> Result<(), GameError> {
        let game = self
            .repository
            .get_game(game_id)?
            .ok_or(GameError::GameNotFound)?;
        if game.is_finished() {
            return Err(GameError::GameFinished);
        }
        Ok(())
    }

    /// Gets a game with its players and rounds.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: &str) -> Result<GameDetail, GameError> {
        let game = self
            .repository
            .get_game(game_id)?
            .ok_or(GameError::GameNotFound)?;
        self.assemble_detail(game)
    }

    /// Lists all games with their players and rounds, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] on persistence failure.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameDetail>, GameError> {
        let games = self.repository.list_games()?;
        games
            .into_iter()
            .map(|game| self.assemble_detail(game))
            .collect()
    }

    /// Plays the next round of a game.
    ///
    /// The repository performs the whole sequence atomically: round-number
    /// allocation, round insertion with its winner computed, and the game
    /// finishing decision.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameNotFound`] for an unknown id and
    /// [`GameError::GameFinished`] if the game already concluded.
    #[instrument(skip(self))]
    pub fn create_round(
        &self,
        game_id: &str,
        player1_choice: Choice,
        player2_choice: Choice,
    ) -> Result<RoundDetail, GameError> {
        let round = self
            .repository
            .create_round(game_id, player1_choice, player2_choice)?;

        let round_winner = self.load_round_winner(&round)?;
        Ok(RoundDetail {
            round,
            round_winner,
        })
    }

    /// Loads the winning player of a resolved round, if any.
    fn load_round_winner(&self, round: &Round) -> Result<Option<Player>, GameError> {
        let Some(winner_id) = round.round_winner_id() else {
            return Ok(None);
        };
        let player = self
            .repository
            .get_player(winner_id)?
            .ok_or_else(|| DbError::new(format!("Round winner '{}' missing", winner_id)))?;
        Ok(Some(player))
    }

    /// Attaches players and rounds to a game record.
    fn assemble_detail(&self, game: Game) -> Result<GameDetail, GameError> {
        let player1 = self
            .repository
            .get_player(game.player1_id())?
            .ok_or_else(|| DbError::new(format!("Player '{}' missing", game.player1_id())))?;
        let player2 = self
            .repository
            .get_player(game.player2_id())?
            .ok_or_else(|| DbError::new(format!("Player '{}' missing", game.player2_id())))?;

        let winner = match game.winner_id() {
            Some(id) if id == player1.id() => Some(player1.clone()),
            Some(id) if id == player2.id() => Some(player2.clone()),
            Some(id) => Some(
                self.repository
                    .get_player(id)?
                    .ok_or_else(|| DbError::new(format!("Winner '{}' missing", id)))?,
            ),
            None => None,
        };

        let rounds = self
            .repository
            .rounds_for_game(&game)?
            .into_iter()
            .map(|round| {
                let round_winner = match round.round_winner_id() {
                    Some(id) if id == player1.id() => Some(player1.clone()),
                    Some(id) if id == player2.id() => Some(player2.clone()),
                    _ => None,
                };
                RoundDetail {
                    round,
                    round_winner,
                }
            })
            .collect();

        Ok(GameDetail {
            game,
            player1,
            player2,
            winner,
            rounds,
        })
    }
}
