//! The game mutation engine.
//!
//! Every operation takes the loaded [`Game`] snapshot, checks its
//! preconditions in a fixed order, and only then writes. A rejected
//! operation leaves the snapshot exactly as it found it.
//!
//! The engine holds no state beyond its [`Policy`]. Asset movements are
//! reported back as [`Movement`]s so the caller can journal them.
//!
//! # Modules
//!
//! - [`roster`] -- Activity switch, factions, players, status flags
//! - [`treasury`] -- Deposits, withdrawals, transfers, balances
//! - [`rounds`] -- Round lifecycle
//! - [`voting`] -- Vote casting and reports

pub mod rounds;
pub mod roster;
pub mod treasury;
pub mod voting;

use banker_types::{Account, DEFAULT_WITHDRAW_LIMIT, Game, LedgerEntryType};

use crate::command::Outcome;
use crate::config::GameConfig;
use crate::error::Rejection;

/// Rule switches that vary between game setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Withdraw limit given to players added without one.
    pub default_withdraw_limit: i64,
    /// Reject withdrawals above the player's `withdraw_limit`.
    pub enforce_withdraw_limit: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            default_withdraw_limit: DEFAULT_WITHDRAW_LIMIT,
            enforce_withdraw_limit: false,
        }
    }
}

impl From<&GameConfig> for Policy {
    fn from(config: &GameConfig) -> Self {
        Self {
            default_withdraw_limit: config.default_withdraw_limit,
            enforce_withdraw_limit: config.enforce_withdraw_limit,
        }
    }
}

/// One asset movement performed by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    /// Kind of movement.
    pub entry_type: LedgerEntryType,
    /// Debited account.
    pub from: Account,
    /// Credited account.
    pub to: Account,
    /// Amount moved, always positive.
    pub amount: i64,
}

impl Movement {
    /// A movement of `amount`, or `None` when nothing actually moves.
    pub fn new(entry_type: LedgerEntryType, from: Account, to: Account, amount: i64) -> Option<Self> {
        (amount > 0 && from != to).then_some(Self {
            entry_type,
            from,
            to,
            amount,
        })
    }

    /// Initial assets entering the game from the bank.
    pub fn grant(to: Account, amount: i64) -> Option<Self> {
        Self::new(LedgerEntryType::Grant, Account::Bank, to, amount)
    }
}

/// A successfully applied operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// What the operation reports back.
    pub outcome: Outcome,
    /// Asset movements it performed.
    pub movements: Vec<Movement>,
}

impl Applied {
    /// An operation that moved no assets.
    pub const fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            movements: Vec::new(),
        }
    }

    /// Attach a movement, skipping empty ones.
    #[must_use]
    pub fn with_movement(mut self, movement: Option<Movement>) -> Self {
        self.movements.extend(movement);
        self
    }
}

/// Applies commands to a game snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameEngine {
    policy: Policy,
}

impl GameEngine {
    /// Create an engine with the given policy.
    pub const fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// The active policy.
    pub const fn policy(&self) -> Policy {
        self.policy
    }
}

/// Player commands only run while the operator has the game switched on.
pub(crate) const fn require_active(game: &Game) -> Result<(), Rejection> {
    if game.is_active {
        Ok(())
    } else {
        Err(Rejection::Inactive)
    }
}

/// Negative amounts never reach the books.
pub(crate) const fn require_non_negative(amount: i64) -> Result<(), Rejection> {
    if amount < 0 {
        Err(Rejection::InvalidAmount(amount))
    } else {
        Ok(())
    }
}

pub(crate) fn credit(balance: i64, amount: i64) -> Result<i64, Rejection> {
    balance.checked_add(amount).ok_or(Rejection::ArithmeticOverflow)
}

/// Debit `amount`, rejecting if the balance does not cover it.
pub(crate) fn debit(balance: i64, amount: i64) -> Result<i64, Rejection> {
    if balance < amount {
        return Err(Rejection::InsufficientFunds {
            requested: amount,
            available: balance,
        });
    }
    balance.checked_sub(amount).ok_or(Rejection::ArithmeticOverflow)
}
