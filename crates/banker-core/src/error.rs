//! Business-rule rejections produced by the mutation engine.
//!
//! A [`Rejection`] is an expected outcome, not a fault: the command is
//! refused, the snapshot is left untouched, and the caller is told which
//! rule was violated.

use banker_types::{FactionName, PlayerId};

/// A named business-rule violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The faction or player is already registered.
    #[error("{0} already exists in this game")]
    AlreadyExists(String),

    /// The named faction has not been added yet.
    #[error("faction {0} has not been defined yet, define this faction first")]
    UnknownFaction(FactionName),

    /// The player is not registered in this game.
    #[error("player {0} is not currently defined in this game")]
    UnknownPlayer(PlayerId),

    /// The player is already on a faction roster.
    #[error("player {player_id} already found in faction {faction_name}, a player can only exist in one faction")]
    AlreadyInFaction {
        /// The player being added.
        player_id: PlayerId,
        /// The faction already holding them.
        faction_name: FactionName,
    },

    /// The player is on no faction roster.
    #[error("player {0} does not have a valid faction")]
    NoFaction(PlayerId),

    /// The acting player is dead or incarcerated.
    #[error("incarcerated or dead players cannot move assets")]
    Incapacitated(PlayerId),

    /// One side of a transfer is dead or incarcerated.
    #[error("incarcerated or dead players cannot send or receive assets (player {0})")]
    IncapacitatedParty(PlayerId),

    /// The debited account holds less than the requested amount.
    #[error("amount {requested} exceeds available assets of {available}")]
    InsufficientFunds {
        /// The requested amount.
        requested: i64,
        /// What the debited account holds.
        available: i64,
    },

    /// The player already used the withdrawal for this phase.
    #[error("no remaining withdrawals available for this phase")]
    WithdrawalExhausted(PlayerId),

    /// The withdrawal exceeds the player's per-withdrawal limit.
    #[error("amount {amount} exceeds the withdraw limit of {limit}")]
    WithdrawalExceedsLimit {
        /// The requested amount.
        amount: i64,
        /// The player's limit.
        limit: i64,
    },

    /// The latest round is still open.
    #[error("round {0} is still active, end it before starting another")]
    RoundAlreadyActive(u64),

    /// No round is open for voting.
    #[error("there is no active round")]
    NoActiveRound,

    /// The requested round does not exist.
    #[error("{}", no_matching_round_message(*.0))]
    NoMatchingRound(Option<u64>),

    /// The voter is not registered or is dead.
    #[error("player {0} is not a living player in this game")]
    UnknownOrDeadPlayer(PlayerId),

    /// The vote target is dead.
    #[error("player {0} is dead and cannot be voted for")]
    DeadTarget(PlayerId),

    /// Both a target player and a sentinel were supplied.
    #[error("choose either a player or an option, not both")]
    AmbiguousChoice,

    /// Neither a target player nor a sentinel was supplied.
    #[error("choose a player or an option")]
    MissingChoice,

    /// The actor is not on the operator list.
    #[error("player {0} is not allowed to run moderator commands")]
    NotOperator(PlayerId),

    /// The game is switched off by the operator.
    #[error("the bot has been put in an inactive state by the moderator, please try again later")]
    Inactive,

    /// Negative amounts are never valid.
    #[error("amount {0} is not a valid asset amount")]
    InvalidAmount(i64),

    /// Only faction bosses may view faction holdings.
    #[error("only faction-boss players may view faction asset holdings")]
    NotFactionBoss(PlayerId),

    /// An asset or counter computation would overflow.
    #[error("asset arithmetic overflow")]
    ArithmeticOverflow,
}

impl Rejection {
    /// Stable machine-readable name of the rule that was violated.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::UnknownFaction(_) => "UnknownFaction",
            Self::UnknownPlayer(_) => "UnknownPlayer",
            Self::AlreadyInFaction { .. } => "AlreadyInFaction",
            Self::NoFaction(_) => "NoFaction",
            Self::Incapacitated(_) => "Incapacitated",
            Self::IncapacitatedParty(_) => "IncapacitatedParty",
            Self::InsufficientFunds { .. } => "InsufficientFunds",
            Self::WithdrawalExhausted(_) => "WithdrawalExhausted",
            Self::WithdrawalExceedsLimit { .. } => "WithdrawalExceedsLimit",
            Self::RoundAlreadyActive(_) => "RoundAlreadyActive",
            Self::NoActiveRound => "NoActiveRound",
            Self::NoMatchingRound(_) => "NoMatchingRound",
            Self::UnknownOrDeadPlayer(_) => "UnknownOrDeadPlayer",
            Self::DeadTarget(_) => "DeadTarget",
            Self::AmbiguousChoice => "AmbiguousChoice",
            Self::MissingChoice => "MissingChoice",
            Self::NotOperator(_) => "NotOperator",
            Self::Inactive => "Inactive",
            Self::InvalidAmount(_) => "InvalidAmount",
            Self::NotFactionBoss(_) => "NotFactionBoss",
            Self::ArithmeticOverflow => "ArithmeticOverflow",
        }
    }
}

fn no_matching_round_message(round: Option<u64>) -> String {
    round.map_or_else(
        || "no rounds have been played yet".to_owned(),
        |n| format!("round {n} does not exist"),
    )
}
