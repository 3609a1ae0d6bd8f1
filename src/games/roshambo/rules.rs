//! Resolution rules for rock-paper-scissors.

use super::types::{Choice, RoundOutcome};
use tracing::instrument;

/// Returns the choice that the given choice defeats.
///
/// The relation is cyclic: rock beats scissors, scissors beat paper,
/// paper beats rock.
pub fn beats(choice: Choice) -> Choice {
    match choice {
        Choice::Rock => Choice::Scissors,
        Choice::Scissors => Choice::Paper,
        Choice::Paper => Choice::Rock,
    }
}

/// Resolves a pair of simultaneous choices.
///
/// Equal choices draw; the first choice wins iff it beats the second;
/// otherwise the second wins.
#[instrument]
pub fn resolve(first: Choice, second: Choice) -> RoundOutcome {
    if first == second {
        RoundOutcome::Draw
    } else if beats(first) == second {
        RoundOutcome::FirstWins
    } else {
        RoundOutcome::SecondWins
    }
}
