//! Database repository for players, games, and rounds.

use chrono::Utc;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::db::{DbError, Game, NewGame, NewPlayer, NewRound, Player, Round, RoundError, schema};
use crate::games::roshambo::{self, Choice};

/// Migrations shipped with the binary and applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for all game entities.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    ///
    /// SQLite only enforces foreign keys when asked, and the cascade
    /// policy on players/games depends on them; the busy timeout makes
    /// concurrent writers wait for the lock instead of failing.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
        Ok(conn)
    }

    /// Applies any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Creates a new player.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the name is already taken (names are unique
    /// case-insensitively) or a database error occurs.
    #[instrument(skip(self))]
    pub fn create_player(&self, name: String) -> Result<Player, DbError> {
        debug!(name = %name, "Creating player");
        let mut conn = self.connection()?;

        let new_player = NewPlayer::new(Uuid::new_v4().to_string(), name);

        let player = diesel::insert_into(schema::players::table)
            .values(&new_player)
            .returning(Player::as_returning())
            .get_result(&mut conn)?;

        info!(player_id = %player.id(), name = %player.name(), "Player created");
        Ok(player)
    }

    /// Gets a player by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_player(&self, id: &str) -> Result<Option<Player>, DbError> {
        let mut conn = self.connection()?;

        let player = schema::players::table
            .find(id)
            .first::<Player>(&mut conn)
            .optional()?;

        Ok(player)
    }

    /// Gets a player by name. The match is case-insensitive; returns
    /// `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, DbError> {
        debug!(name = %name, "Looking up player by name");
        let mut conn = self.connection()?;

        let player = schema::players::table
            .filter(schema::players::name.eq(name))
            .first::<Player>(&mut conn)
            .optional()?;

        if let Some(ref p) = player {
            debug!(player_id = %p.id(), "Player found");
        } else {
            debug!("Player not found");
        }

        Ok(player)
    }

    /// Creates a new game between two players.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn create_game(&self, player1_id: &str, player2_id: &str) -> Result<Game, DbError> {
        debug!(player1_id = %player1_id, player2_id = %player2_id, "Creating game");
        let mut conn = self.connection()?;

        let new_game = NewGame::new(
            Uuid::new_v4().to_string(),
            player1_id.to_string(),
            player2_id.to_string(),
        );

        let game = diesel::insert_into(schema::games::table)
            .values(&new_game)
            .returning(Game::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = %game.id(), "Game created");
        Ok(game)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: &str) -> Result<Option<Game>, DbError> {
        let mut conn = self.connection()?;

        let game = schema::games::table
            .find(id)
            .first::<Game>(&mut conn)
            .optional()?;

        Ok(game)
    }

    /// Lists all games, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<Game>, DbError> {
        debug!("Listing all games");
        let mut conn = self.connection()?;

        let games = schema::games::table
            .order(schema::games::created_at.asc())
            .load::<Game>(&mut conn)?;

        info!(count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Gets all rounds of a game in round-number order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    pub fn rounds_for_game(&self, game: &Game) -> Result<Vec<Round>, DbError> {
        let mut conn = self.connection()?;

        let rounds = Round::belonging_to(game)
            .order(schema::rounds::round_number.asc())
            .load::<Round>(&mut conn)?;

        Ok(rounds)
    }

    /// Creates the next round of a game and resolves its consequences.
    ///
    /// The whole sequence runs in one immediate transaction so concurrent
    /// requests cannot allocate the same round number or double-finish the
    /// game: re-read the game, reject if finished, allocate `round_number`
    /// as count + 1, insert the round with its winner already computed,
    /// then re-count wins and, at the threshold, record the game winner,
    /// stamp `finished_at`, and credit the winner's score.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::GameNotFound`] for an unknown game id,
    /// [`RoundError::GameFinished`] if the game already concluded, and
    /// [`RoundError::Db`] for database failures.
    #[instrument(skip(self), fields(game_id = %game_id))]
    pub fn create_round(
        &self,
        game_id: &str,
        player1_choice: Choice,
        player2_choice: Choice,
    ) -> Result<Round, RoundError> {
        debug!(
            player1_choice = %player1_choice,
            player2_choice = %player2_choice,
            "Creating round"
        );
        let mut conn = self.connection()?;

        let round = conn.immediate_transaction::<_, RoundError, _>(|conn| {
            let game = schema::games::table
                .find(game_id)
                .first::<Game>(conn)
                .optional()?
                .ok_or(RoundError::GameNotFound)?;

            if game.is_finished() {
                return Err(RoundError::GameFinished);
            }

            let existing: i64 = Round::belonging_to(&game).count().get_result(conn)?;
            let round_number = existing as i32 + 1;

            let outcome = roshambo::resolve(player1_choice, player2_choice);
            let round_winner_id = game.round_winner_id(outcome).map(str::to_string);

            let new_round = NewRound::new(
                Uuid::new_v4().to_string(),
                game.id().clone(),
                round_number,
                player1_choice.as_str().to_string(),
                player2_choice.as_str().to_string(),
                round_winner_id,
            );

            let round = diesel::insert_into(schema::rounds::table)
                .values(&new_round)
                .returning(Round::as_returning())
                .get_result::<Round>(conn)?;

            let rounds = Round::belonging_to(&game).load::<Round>(conn)?;
            if let Some(winner_id) = game.decide_winner(&rounds) {
                let winner_id = winner_id.to_string();
                let now = Utc::now().naive_utc();

                diesel::update(schema::games::table.find(game.id()))
                    .set((
                        schema::games::winner_id.eq(&winner_id),
                        schema::games::finished_at.eq(now),
                    ))
                    .execute(conn)?;

                diesel::update(schema::players::table.find(&winner_id))
                    .set((
                        schema::players::score.eq(schema::players::score + 1),
                        schema::players::updated_at.eq(now),
                    ))
                    .execute(conn)?;

                info!(game_id = %game.id(), winner_id = %winner_id, "Game finished");
            }

            Ok(round)
        })?;

        info!(
            round_id = %round.id(),
            round_number = round.round_number(),
            winner = ?round.round_winner_id(),
            "Round created"
        );
        Ok(round)
    }
}
