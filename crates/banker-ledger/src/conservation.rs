//! Conservation audit for committed commands.
//!
//! Deposits, withdrawals, and transfers move assets between accounts and
//! never change the game's total holdings (every player stash plus every
//! faction's holdings). Grants from the bank are the only source flow.
//!
//! For each committed revision R:
//!
//! ```text
//! total_after(R) == total_before(R) + sum(grants recorded under R)
//! ```
//!
//! A violation produces a [`LedgerAnomaly`]; the caller must refuse to
//! persist the snapshot.

use banker_types::{LedgerEntry, LedgerEntryType};

use crate::LedgerAnomaly;

/// The result of a conservation audit for a single revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// Holdings changed exactly by the recorded grants.
    Balanced,
    /// Holdings changed by something other than the recorded grants.
    Anomaly(LedgerAnomaly),
}

impl ConservationResult {
    /// Whether the audit passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Audit one committed revision against the journal.
pub fn verify_holdings(
    revision: u64,
    before: i64,
    after: i64,
    entries: &[LedgerEntry],
) -> ConservationResult {
    let mut granted: i64 = 0;
    for entry in entries {
        if entry.revision != revision || entry.entry_type != LedgerEntryType::Grant {
            continue;
        }
        granted = match granted.checked_add(entry.amount) {
            Some(val) => val,
            None => return overflow_anomaly(revision, before, after),
        };
    }

    let Some(expected) = before.checked_add(granted) else {
        return overflow_anomaly(revision, before, after);
    };

    if expected == after {
        ConservationResult::Balanced
    } else {
        ConservationResult::Anomaly(LedgerAnomaly {
            revision,
            before,
            after,
            granted,
            message: format!(
                "LEDGER_ANOMALY at revision {revision}: holdings moved {before} -> {after} with {granted} granted",
            ),
        })
    }
}

/// Construct an anomaly result for arithmetic overflow during summation.
fn overflow_anomaly(revision: u64, before: i64, after: i64) -> ConservationResult {
    ConservationResult::Anomaly(LedgerAnomaly {
        revision,
        before,
        after,
        granted: 0,
        message: format!("LEDGER_ANOMALY at revision {revision}: arithmetic overflow while summing grants"),
    })
}
