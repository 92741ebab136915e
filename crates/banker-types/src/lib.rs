//! Shared game-state types for the Banker game.
//!
//! This crate is the single source of truth for the entity model used
//! across the workspace: players, factions, rounds, votes, the [`Game`]
//! aggregate that is persisted wholesale, and the ledger entry record.
//!
//! # Modules
//!
//! - [`ids`] -- Player ids and UUID-backed record ids
//! - [`enums`] -- Faction roster, vote choices, ledger classifications
//! - [`structs`] -- Entity structs and the [`Game`] aggregate
//! - [`query`] -- Lookup helpers over the aggregate

pub mod enums;
pub mod ids;
pub mod query;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BalanceKind, EntityType, FactionName, LedgerEntryType, NO_VOTE_LABEL, Sentinel,
    UNVOTE_LABEL, UnknownFactionName, VoteChoice,
};
pub use ids::{CommandId, LedgerEntryId, PlayerId};
pub use query::SELECTION_CAP;
pub use structs::{
    Account, DEFAULT_WITHDRAW_LIMIT, Faction, Game, LedgerEntry, Player, Round, Vote,
    VoteTimestamp,
};
