//! Vote tallies.
//!
//! Votes are grouped by choice label. Groups are ordered by voter count,
//! largest first; equal counts are ordered by ascending label so the
//! report is reproducible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use banker_types::{PlayerId, Round};

/// All votes for one choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Choice label: a player id or `"No Vote"`.
    pub choice: String,
    /// Voters in the order their votes were recorded.
    pub voters: Vec<PlayerId>,
}

impl VoteTally {
    /// Number of voters.
    pub fn count(&self) -> usize {
        self.voters.len()
    }
}

/// The tally of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReport {
    /// The round tallied.
    pub round_number: u64,
    /// Whether the round is still open.
    pub is_active_round: bool,
    /// Ordered tallies.
    pub tallies: Vec<VoteTally>,
}

impl VoteReport {
    /// Tally a round.
    pub fn tally(round: &Round) -> Self {
        let mut groups: BTreeMap<String, Vec<PlayerId>> = BTreeMap::new();
        for vote in &round.votes {
            groups
                .entry(vote.choice.label())
                .or_default()
                .push(vote.player_id);
        }

        let mut tallies: Vec<VoteTally> = groups
            .into_iter()
            .map(|(choice, voters)| VoteTally { choice, voters })
            .collect();
        // Stable sort keeps the ascending-label order among equal counts.
        tallies.sort_by(|a, b| b.count().cmp(&a.count()));

        Self {
            round_number: round.round_number,
            is_active_round: round.is_active_round,
            tallies,
        }
    }

    /// Total votes cast.
    pub fn total_votes(&self) -> usize {
        self.tallies.iter().map(VoteTally::count).sum()
    }
}

impl core::fmt::Display for VoteReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Round {} votes", self.round_number)?;
        if self.tallies.is_empty() {
            return write!(f, ": none");
        }
        for tally in &self.tallies {
            let voters: Vec<String> = tally.voters.iter().map(ToString::to_string).collect();
            write!(
                f,
                "\n{}: {} ({})",
                tally.choice,
                tally.count(),
                voters.join(", ")
            )?;
        }
        Ok(())
    }
}
