//! Votes within the active round and the per-round tally.
//!
//! A player holds at most one vote per round. Voting again replaces the
//! choice and timestamp in place; `"Unvote"` removes it.

use banker_types::{Game, PlayerId, Sentinel, Vote, VoteChoice, VoteTimestamp};

use super::{Applied, GameEngine, require_active};
use crate::command::Outcome;
use crate::error::Rejection;
use crate::report::VoteReport;

impl GameEngine {
    /// Record, replace, or withdraw the actor's vote in the active round.
    ///
    /// Exactly one of `target` and `sentinel` must be supplied. `now` is
    /// the commit time in Unix seconds.
    pub fn cast_vote(
        &self,
        game: &mut Game,
        actor: PlayerId,
        target: Option<PlayerId>,
        sentinel: Option<Sentinel>,
        now: i64,
    ) -> Result<Applied, Rejection> {
        require_active(game)?;
        let round_number = match game.latest_round() {
            Some(round) if round.is_active_round => round.round_number,
            _ => return Err(Rejection::NoActiveRound),
        };
        if !game.is_living_player(actor) {
            return Err(Rejection::UnknownOrDeadPlayer(actor));
        }

        let choice = match (target, sentinel) {
            (Some(_), Some(_)) => return Err(Rejection::AmbiguousChoice),
            (None, None) => return Err(Rejection::MissingChoice),
            (None, Some(Sentinel::Unvote)) => None,
            (None, Some(Sentinel::NoVote)) => Some(VoteChoice::NoVote),
            (Some(id), None) => {
                let voted = game.player(id).ok_or(Rejection::UnknownPlayer(id))?;
                if voted.is_dead {
                    return Err(Rejection::DeadTarget(id));
                }
                Some(VoteChoice::Player(id))
            }
        };

        let round = game.latest_round_mut().ok_or(Rejection::NoActiveRound)?;
        let Some(choice) = choice else {
            let before = round.votes.len();
            round.votes.retain(|v| v.player_id != actor);
            let removed = round.votes.len() != before;
            tracing::debug!(round_number, voter = %actor, removed, "Vote withdrawn");
            return Ok(Applied::new(Outcome::VoteRemoved {
                round_number,
                removed,
            }));
        };

        let replaced = if let Some(existing) = round.votes.iter_mut().find(|v| v.player_id == actor) {
            existing.choice = choice;
            existing.timestamp = VoteTimestamp::from_secs(now);
            true
        } else {
            round.votes.push(Vote {
                player_id: actor,
                choice,
                timestamp: VoteTimestamp::from_secs(now),
            });
            false
        };

        tracing::debug!(
            round_number,
            voter = %actor,
            choice = %choice.label(),
            replaced,
            "Vote cast"
        );
        Ok(Applied::new(Outcome::VoteCast {
            round_number,
            choice,
            replaced,
        }))
    }

    /// Tally a round: the given number, or the latest when `None`.
    pub fn vote_report(&self, game: &Game, round: Option<u64>) -> Result<Applied, Rejection> {
        let found = match round {
            Some(n) => game.round(n),
            None => game.latest_round(),
        };
        let found = found.ok_or(Rejection::NoMatchingRound(round))?;
        Ok(Applied::new(Outcome::VoteReport(VoteReport::tally(found))))
    }
}
