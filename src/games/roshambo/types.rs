//! Core domain types for rock-paper-scissors.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A throw in rock-paper-scissors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Rock crushes scissors.
    Rock,
    /// Paper covers rock.
    Paper,
    /// Scissors cut paper.
    Scissors,
}

impl Choice {
    /// The string stored in the database and used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Choice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Self::Rock),
            "paper" => Ok(Self::Paper),
            "scissors" => Ok(Self::Scissors),
            _ => Err(InvalidChoice {
                value: s.to_string(),
            }),
        }
    }
}

/// Error returned when parsing an unrecognized choice value.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("'{value}' is not a valid choice")]
pub struct InvalidChoice {
    /// The rejected input.
    #[error(not(source))]
    pub value: String,
}

/// Outcome of a single round, from the first player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// The first choice beats the second.
    FirstWins,
    /// The second choice beats the first.
    SecondWins,
    /// Equal choices; no winner.
    Draw,
}
