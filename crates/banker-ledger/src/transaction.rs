//! Transaction builders and validation for the asset ledger.
//!
//! Provides a [`TransactionBuilder`] that enforces the double-entry invariant:
//! every movement names a debited account and a credited account of the
//! kinds allowed for its [`LedgerEntryType`], and moves a strictly positive
//! amount.

use chrono::Utc;

use banker_types::{Account, EntityType, LedgerEntry, LedgerEntryId, LedgerEntryType};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Transaction builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`LedgerEntry`] values.
///
/// # Examples
///
/// ```
/// use banker_ledger::TransactionBuilder;
/// use banker_types::{Account, FactionName, LedgerEntryType, PlayerId};
///
/// let entry = TransactionBuilder::new(3, LedgerEntryType::Deposit)
///     .from(Account::Player(PlayerId(1)))
///     .to(Account::Faction(FactionName::DelLoboGang))
///     .amount(4)
///     .build();
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct TransactionBuilder {
    revision: u64,
    entry_type: LedgerEntryType,
    from: Option<Account>,
    to: Option<Account>,
    amount: Option<i64>,
}

impl TransactionBuilder {
    /// Start building a ledger entry for the given game revision and type.
    pub const fn new(revision: u64, entry_type: LedgerEntryType) -> Self {
        Self {
            revision,
            entry_type,
            from: None,
            to: None,
            amount: None,
        }
    }

    /// Set the debited account.
    #[must_use]
    pub const fn from(mut self, account: Account) -> Self {
        self.from = Some(account);
        self
    }

    /// Set the credited account.
    #[must_use]
    pub const fn to(mut self, account: Account) -> Self {
        self.to = Some(account);
        self
    }

    /// Set the amount moved.
    #[must_use]
    pub const fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Validate inputs and produce a [`LedgerEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroAmount`] or [`LedgerError::NegativeAmount`]
    /// for non-positive amounts, [`LedgerError::MissingField`] when a side
    /// or the amount is unset, [`LedgerError::InvalidEntityType`] when an
    /// account kind breaks the entry type contract, and
    /// [`LedgerError::SelfTransfer`] when both sides are the same account.
    pub fn build(self) -> Result<LedgerEntry, LedgerError> {
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;
        let from = self.from.ok_or(LedgerError::MissingField("from"))?;
        let to = self.to.ok_or(LedgerError::MissingField("to"))?;

        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if amount < 0 {
            return Err(LedgerError::NegativeAmount { amount });
        }

        validate_accounts(self.entry_type, from, to)?;

        Ok(LedgerEntry {
            id: LedgerEntryId::new(),
            entry_type: self.entry_type,
            from,
            to,
            amount,
            revision: self.revision,
            created_at: Utc::now(),
        })
    }
}

/// Validate the from/to accounts against the contract for the entry type.
fn validate_accounts(
    entry_type: LedgerEntryType,
    from: Account,
    to: Account,
) -> Result<(), LedgerError> {
    let (expected_from, expected_to) = expected_entity_types(entry_type);

    if !expected_from.contains(&from.entity_type()) {
        return Err(LedgerError::InvalidEntityType {
            entry_type,
            side: "from",
            expected: expected_from,
            actual: from.entity_type(),
        });
    }

    if !expected_to.contains(&to.entity_type()) {
        return Err(LedgerError::InvalidEntityType {
            entry_type,
            side: "to",
            expected: expected_to,
            actual: to.entity_type(),
        });
    }

    if from == to {
        return Err(LedgerError::SelfTransfer);
    }

    Ok(())
}

/// Return the accepted (from, to) entity kinds for each [`LedgerEntryType`].
const fn expected_entity_types(
    entry_type: LedgerEntryType,
) -> (&'static [EntityType], &'static [EntityType]) {
    match entry_type {
        LedgerEntryType::Grant => (
            &[EntityType::Bank],
            &[EntityType::Player, EntityType::Faction],
        ),
        LedgerEntryType::Deposit => (&[EntityType::Player], &[EntityType::Faction]),
        LedgerEntryType::Withdraw => (&[EntityType::Faction], &[EntityType::Player]),
        LedgerEntryType::Transfer => (&[EntityType::Player], &[EntityType::Player]),
    }
}
