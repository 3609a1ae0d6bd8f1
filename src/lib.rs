//! Roshambo library - rock-paper-scissors as a small stateful API.
//!
//! Players are created on demand by name, a game pairs two players, and
//! rounds are appended until one player accumulates three round wins.
//!
//! # Architecture
//!
//! - **games**: pure choice types and resolution rules
//! - **db**: Diesel/SQLite repository owning schema, models, and the
//!   serializing round-creation transaction
//! - **service**: lookup-or-create players, validation, detail assembly
//! - **api**: axum REST surface with `{detail, code}` error bodies
//!
//! # Example
//!
//! ```no_run
//! use roshambo::{AppState, GameRepository, GameService, api};
//!
//! # fn example() -> Result<(), roshambo::DbError> {
//! let repository = GameRepository::new("roshambo.db".to_string())?;
//! repository.run_migrations()?;
//! let app = api::router(AppState::new(GameService::new(repository)));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod db;
mod service;

// Public module declarations
pub mod api;
pub mod games;

// Crate-level exports - persistence
pub use db::{DbError, Game, GameRepository, Player, Round, RoundError};

// Crate-level exports - service layer
pub use service::{GameDetail, GameError, GameService, RoundDetail};

// Crate-level exports - API surface
pub use api::AppState;

// Crate-level exports - game types
pub use games::roshambo::{Choice, InvalidChoice, RoundOutcome};
