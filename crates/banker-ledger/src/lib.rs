//! Asset movement journal and conservation audit for the Banker game.
//!
//! Every committed deposit, withdrawal, transfer, and initial grant is
//! recorded here as a double-entry [`LedgerEntry`]: one account is debited
//! and another credited by the same amount. Assets enter the game only
//! through grants from the bank; no other movement may create or destroy
//! them.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`Ledger`] struct: append-only log with recording methods.
//! - [`transaction`] -- The [`TransactionBuilder`] for validated entry construction.
//! - [`conservation`] -- Holdings audit comparing game totals against the journal.
//!
//! # Conservation Law
//!
//! For every committed command:
//!
//! ```text
//! total_after == total_before + sum(grants in command)
//! ```
//!
//! A violation produces a [`LedgerAnomaly`]. The ledger never panics; it
//! returns errors.
//!
//! | Type | From (debit) | To (credit) |
//! |------|-------------|-------------|
//! | Grant | Bank | Player or Faction |
//! | Deposit | Player | Faction |
//! | Withdraw | Faction | Player |
//! | Transfer | Player | Player |
//!
//! # Usage
//!
//! ```
//! use banker_ledger::Ledger;
//! use banker_ledger::conservation::{verify_holdings, ConservationResult};
//! use banker_types::{Account, FactionName, LedgerEntryType, PlayerId};
//!
//! let mut ledger = Ledger::new();
//! let player = Account::Player(PlayerId(1));
//! let faction = Account::Faction(FactionName::RobberBaronCornwall);
//!
//! ledger.record(1, LedgerEntryType::Deposit, player, faction, 4).ok();
//!
//! // A deposit moves assets; the total is unchanged.
//! assert_eq!(verify_holdings(1, 10, 10, ledger.entries()), ConservationResult::Balanced);
//! ```

pub mod conservation;
pub mod ledger;
pub mod transaction;

// Re-export primary types at crate root.
pub use conservation::ConservationResult;
pub use ledger::Ledger;
pub use transaction::TransactionBuilder;

use banker_types::{EntityType, LedgerEntryType};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when recording ledger entries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Amount must be non-zero.
    #[error("ledger entry amount must be non-zero")]
    ZeroAmount,

    /// Amount must not be negative.
    #[error("ledger entry amount must be positive, got {amount}")]
    NegativeAmount {
        /// The invalid amount.
        amount: i64,
    },

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The from/to account kinds do not match the contract for the
    /// entry type.
    #[error("invalid account for {entry_type:?} {side}: expected {expected:?}, got {actual:?}")]
    InvalidEntityType {
        /// The entry type being validated.
        entry_type: LedgerEntryType,
        /// Which side of the entry ("from" or "to").
        side: &'static str,
        /// The accepted entity kinds.
        expected: &'static [EntityType],
        /// The entity kind supplied.
        actual: EntityType,
    },

    /// Debit and credit name the same account.
    #[error("ledger entry debits and credits the same account")]
    SelfTransfer,

    /// An internal error that should not occur in normal operation.
    #[error("internal ledger error: {0}")]
    InternalError(&'static str),
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A conservation violation detected while auditing a committed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// Game revision being audited.
    pub revision: u64,
    /// Total holdings before the command.
    pub before: i64,
    /// Total holdings after the command.
    pub after: i64,
    /// Sum of grants recorded by the command.
    pub granted: i64,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
