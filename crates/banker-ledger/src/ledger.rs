//! The asset ledger: an append-only log of every committed movement.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Double-entry**: every movement has a debit (from) and credit (to).
//! - **Conservation**: only grants change the total holdings.
//! - **Integers**: amounts are whole asset units.

use banker_types::{Account, LedgerEntry, LedgerEntryType};

use crate::conservation::{ConservationResult, verify_holdings};
use crate::{LedgerError, TransactionBuilder};

/// The journal of asset movements for the running game.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    /// All entries, in insertion order.
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Return the number of entries in the ledger.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every entry from `other`, keeping its order.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Build, validate, and append a movement.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record(
        &mut self,
        revision: u64,
        entry_type: LedgerEntryType,
        from: Account,
        to: Account,
        amount: i64,
    ) -> Result<&LedgerEntry, LedgerError> {
        let entry = TransactionBuilder::new(revision, entry_type)
            .from(from)
            .to(to)
            .amount(amount)
            .build()?;
        tracing::debug!(
            revision,
            entry_type = ?entry.entry_type,
            from = %entry.from,
            to = %entry.to,
            amount,
            "Recorded ledger entry"
        );
        self.entries.push(entry);

        self.entries.last().ok_or(LedgerError::InternalError(
            "failed to retrieve entry after append",
        ))
    }

    /// Audit a committed command: the holdings delta must equal the
    /// grants recorded under `revision`.
    pub fn verify_holdings(&self, revision: u64, before: i64, after: i64) -> ConservationResult {
        verify_holdings(revision, before, after, &self.entries)
    }

    /// Return all entries, in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Return all entries recorded under a given revision.
    pub fn entries_for_revision(&self, revision: u64) -> Vec<&LedgerEntry> {
        self.entries.iter().filter(|e| e.revision == revision).collect()
    }
}

#[cfg(test)]
mod tests {
    use banker_types::{FactionName, PlayerId};

    use super::*;

    const CORNWALL: Account = Account::Faction(FactionName::RobberBaronCornwall);
    const P1: Account = Account::Player(PlayerId(1));
    const P2: Account = Account::Player(PlayerId(2));

    #[test]
    fn new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn record_appends_entry() {
        let mut ledger = Ledger::new();
        let result = ledger.record(1, LedgerEntryType::Deposit, P1, CORNWALL, 4);
        assert!(result.is_ok_and(|e| e.amount == 4 && e.revision == 1));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn invalid_entry_is_not_appended() {
        let mut ledger = Ledger::new();
        assert!(ledger.record(1, LedgerEntryType::Transfer, P1, P2, 0).is_err());
        assert!(
            ledger
                .record(1, LedgerEntryType::Deposit, CORNWALL, P1, 3)
                .is_err()
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn extend_keeps_order() {
        let mut ledger = Ledger::new();
        let _ = ledger.record(1, LedgerEntryType::Grant, Account::Bank, P1, 10);
        let mut journal = Ledger::new();
        let _ = journal.record(2, LedgerEntryType::Transfer, P1, P2, 2);
        let _ = journal.record(2, LedgerEntryType::Transfer, P2, P1, 1);
        ledger.extend(journal);

        let revisions: Vec<u64> = ledger.entries().iter().map(|e| e.revision).collect();
        assert_eq!(revisions, vec![1, 2, 2]);
        assert_eq!(ledger.entries_for_revision(2).len(), 2);
    }

    #[test]
    fn grant_then_deposit_balances() {
        let mut ledger = Ledger::new();
        let _ = ledger.record(1, LedgerEntryType::Grant, Account::Bank, P1, 10);
        assert_eq!(ledger.verify_holdings(1, 0, 10), ConservationResult::Balanced);

        let _ = ledger.record(2, LedgerEntryType::Deposit, P1, CORNWALL, 4);
        assert_eq!(ledger.verify_holdings(2, 10, 10), ConservationResult::Balanced);
        assert!(!ledger.verify_holdings(2, 10, 11).is_balanced());
    }
}
