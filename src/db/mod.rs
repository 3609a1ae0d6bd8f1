//! Database persistence layer for players, games, and rounds.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, RoundError};
pub use models::{Game, NewGame, NewPlayer, NewRound, Player, Round};
pub use repository::GameRepository;
