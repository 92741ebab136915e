//! Enumeration types for the Banker game.
//!
//! Covers the fixed faction roster, vote choices and sentinels, balance
//! query kinds, and the ledger entry classification.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;

// ---------------------------------------------------------------------------
// Factions
// ---------------------------------------------------------------------------

/// One of the fixed set of game factions.
///
/// Faction names are the lookup key for factions and are persisted as the
/// display string (e.g. `"Robber Baron - Cornwall"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactionName {
    /// The Van der Linde gang.
    #[serde(rename = "Van der Linde Gang")]
    VanDerLindeGang,
    /// The O'Driscoll boys.
    #[serde(rename = "O'Driscoll Boys")]
    ODriscollBoys,
    /// The Lemoyne raiders.
    #[serde(rename = "Lemoyne Raiders")]
    LemoyneRaiders,
    /// The Del Lobo gang.
    #[serde(rename = "Del Lobo Gang")]
    DelLoboGang,
    /// The Wapiti.
    #[serde(rename = "Wapiti Indians")]
    WapitiIndians,
    /// The Pinkerton agency.
    #[serde(rename = "Pinkerton Detective Agency")]
    PinkertonDetectiveAgency,
    /// Robber baron Cornwall.
    #[serde(rename = "Robber Baron - Cornwall")]
    RobberBaronCornwall,
    /// Robber baron Bronte.
    #[serde(rename = "Robber Baron - Bronte")]
    RobberBaronBronte,
    /// Robber baron Braithwaite.
    #[serde(rename = "Robber Baron - Braithwaite")]
    RobberBaronBraithwaite,
    /// Robber baron Gray.
    #[serde(rename = "Robber Baron - Gray")]
    RobberBaronGray,
}

impl FactionName {
    /// Every faction in roster order.
    pub const ALL: [Self; 10] = [
        Self::VanDerLindeGang,
        Self::ODriscollBoys,
        Self::LemoyneRaiders,
        Self::DelLoboGang,
        Self::WapitiIndians,
        Self::PinkertonDetectiveAgency,
        Self::RobberBaronCornwall,
        Self::RobberBaronBronte,
        Self::RobberBaronBraithwaite,
        Self::RobberBaronGray,
    ];

    /// The display label, identical to the persisted form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VanDerLindeGang => "Van der Linde Gang",
            Self::ODriscollBoys => "O'Driscoll Boys",
            Self::LemoyneRaiders => "Lemoyne Raiders",
            Self::DelLoboGang => "Del Lobo Gang",
            Self::WapitiIndians => "Wapiti Indians",
            Self::PinkertonDetectiveAgency => "Pinkerton Detective Agency",
            Self::RobberBaronCornwall => "Robber Baron - Cornwall",
            Self::RobberBaronBronte => "Robber Baron - Bronte",
            Self::RobberBaronBraithwaite => "Robber Baron - Braithwaite",
            Self::RobberBaronGray => "Robber Baron - Gray",
        }
    }
}

impl core::fmt::Display for FactionName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the game factions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFactionName(pub String);

impl core::fmt::Display for UnknownFactionName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown faction name: {}", self.0)
    }
}

impl std::error::Error for UnknownFactionName {}

impl FromStr for FactionName {
    type Err = UnknownFactionName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFactionName(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

/// Label persisted for an explicit abstention.
pub const NO_VOTE_LABEL: &str = "No Vote";

/// Label of the sentinel that withdraws a previously cast vote.
pub const UNVOTE_LABEL: &str = "Unvote";

/// The stored choice of a [`Vote`](crate::Vote).
///
/// Persisted as a string: either the stringified target player id or the
/// `"No Vote"` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VoteChoice {
    /// A vote against a living player.
    Player(PlayerId),
    /// An explicit abstention.
    NoVote,
}

impl VoteChoice {
    /// The label used for grouping and persistence.
    pub fn label(self) -> String {
        match self {
            Self::Player(id) => id.to_string(),
            Self::NoVote => NO_VOTE_LABEL.to_owned(),
        }
    }
}

impl From<VoteChoice> for String {
    fn from(choice: VoteChoice) -> Self {
        choice.label()
    }
}

impl TryFrom<String> for VoteChoice {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == NO_VOTE_LABEL {
            return Ok(Self::NoVote);
        }
        value
            .parse::<PlayerId>()
            .map(Self::Player)
            .map_err(|e| format!("invalid vote choice {value:?}: {e}"))
    }
}

/// A non-player choice a voter can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentinel {
    /// Record an explicit abstention.
    #[serde(rename = "No Vote")]
    NoVote,
    /// Remove the voter's current vote for the round.
    #[serde(rename = "Unvote")]
    Unvote,
}

impl core::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoVote => f.write_str(NO_VOTE_LABEL),
            Self::Unvote => f.write_str(UNVOTE_LABEL),
        }
    }
}

// ---------------------------------------------------------------------------
// Balance queries
// ---------------------------------------------------------------------------

/// Which holdings a balance query reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceKind {
    /// The actor's personal stash.
    Player,
    /// The actor's faction holdings (faction bosses only).
    Faction,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Classification of an asset movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryType {
    /// Initial assets handed out when a player or faction is created.
    Grant,
    /// Player stash to faction holdings.
    Deposit,
    /// Faction holdings to player stash.
    Withdraw,
    /// Player stash to another player's stash.
    Transfer,
}

/// Kind of entity on either side of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// The game master's bank; source of all grants.
    Bank,
    /// A player's personal stash.
    Player,
    /// A faction's pooled holdings.
    Faction,
}
