//! Round lifecycle: numbered voting phases, at most one open at a time.

use banker_types::{Game, Round};

use super::{Applied, GameEngine};
use crate::command::Outcome;
use crate::error::Rejection;

impl GameEngine {
    /// Open round 1, or the round after the latest once that one is closed.
    pub fn start_round(&self, game: &mut Game) -> Result<Applied, Rejection> {
        let round_number = match game.latest_round() {
            None => 1,
            Some(latest) if latest.is_active_round => {
                return Err(Rejection::RoundAlreadyActive(latest.round_number));
            }
            Some(latest) => latest
                .round_number
                .checked_add(1)
                .ok_or(Rejection::ArithmeticOverflow)?,
        };

        game.rounds.push(Round::open(round_number));
        tracing::info!(round_number, "Round started");
        Ok(Applied::new(Outcome::RoundStarted { round_number }))
    }

    /// Close the latest round. Closing an already closed round succeeds.
    pub fn end_round(&self, game: &mut Game) -> Result<Applied, Rejection> {
        let latest = game.latest_round_mut().ok_or(Rejection::NoActiveRound)?;
        let was_active = latest.is_active_round;
        latest.is_active_round = false;
        let round_number = latest.round_number;

        tracing::info!(round_number, was_active, "Round ended");
        Ok(Applied::new(Outcome::RoundEnded {
            round_number,
            was_active,
        }))
    }
}
