//! Command intents and their outcomes.
//!
//! A [`CommandIntent`] is what the dispatch boundary hands the core: who
//! is acting and which typed command they invoked. An [`Outcome`] is the
//! success payload describing what changed.

use serde::{Deserialize, Serialize};

use banker_types::{BalanceKind, FactionName, PlayerId, Sentinel, VoteChoice};

use crate::report::VoteReport;

/// One command invocation from the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandIntent {
    /// Platform id of the invoking user.
    pub actor: PlayerId,
    /// The typed command.
    pub command: Command,
}

impl CommandIntent {
    /// Pair a command with its actor.
    pub const fn new(actor: PlayerId, command: Command) -> Self {
        Self { actor, command }
    }
}

/// Every command the game understands.
///
/// Serialized with a `name` tag carrying the kebab-case command name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Command {
    /// Operator: switch player commands on or off.
    ToggleActivity {
        /// New value of the global switch.
        active: bool,
    },
    /// Operator: register a faction.
    AddFaction {
        /// Which faction.
        faction_name: FactionName,
        /// Starting holdings.
        #[serde(default)]
        initial_assets: i64,
    },
    /// Operator: register a player and put them on a faction roster.
    AddPlayer {
        /// The player's platform id.
        player_id: PlayerId,
        /// The player's display name.
        display_name: String,
        /// The faction to join.
        faction_name: FactionName,
        /// Starting personal assets.
        #[serde(default)]
        initial_assets: i64,
        /// Per-withdrawal limit; the configured default when absent.
        #[serde(default)]
        withdraw_limit: Option<i64>,
        /// Whether the player leads the faction.
        #[serde(default)]
        is_faction_boss: bool,
    },
    /// Operator: set a player's incarceration flag.
    SetIncarcerated {
        /// Target player.
        player_id: PlayerId,
        /// New flag value.
        incarcerated: bool,
    },
    /// Operator: set a player's death flag.
    SetDead {
        /// Target player.
        player_id: PlayerId,
        /// New flag value.
        dead: bool,
    },
    /// Operator: restore the daily withdrawal for every free, living player.
    RefreshWithdrawals,
    /// Move assets from the actor's stash into their faction.
    Deposit {
        /// Amount moved.
        amount: i64,
    },
    /// Move assets from the actor's faction into their stash.
    Withdraw {
        /// Amount moved.
        amount: i64,
    },
    /// Move assets from the actor's stash to another player.
    Transfer {
        /// Receiving player.
        receiver: PlayerId,
        /// Amount moved.
        amount: i64,
    },
    /// Report the actor's own or faction holdings.
    Balance {
        /// Which holdings.
        of: BalanceKind,
    },
    /// Operator: open the next round.
    StartRound,
    /// Operator: close the latest round.
    EndRound,
    /// Vote in the active round.
    CastVote {
        /// Player voted against.
        #[serde(default)]
        target: Option<PlayerId>,
        /// Non-player option.
        #[serde(default)]
        sentinel: Option<Sentinel>,
    },
    /// Tally the votes of a round (the latest when `round` is absent).
    VoteReport {
        /// Round number.
        #[serde(default)]
        round: Option<u64>,
    },
    /// Living players, optionally filtered by name.
    ListPlayers {
        /// Case-insensitive name fragment.
        #[serde(default)]
        filter: Option<String>,
    },
}

impl Command {
    /// The kebab-case command name, for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ToggleActivity { .. } => "toggle-activity",
            Self::AddFaction { .. } => "add-faction",
            Self::AddPlayer { .. } => "add-player",
            Self::SetIncarcerated { .. } => "set-incarcerated",
            Self::SetDead { .. } => "set-dead",
            Self::RefreshWithdrawals => "refresh-withdrawals",
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Transfer { .. } => "transfer",
            Self::Balance { .. } => "balance",
            Self::StartRound => "start-round",
            Self::EndRound => "end-round",
            Self::CastVote { .. } => "cast-vote",
            Self::VoteReport { .. } => "vote-report",
            Self::ListPlayers { .. } => "list-players",
        }
    }

    /// Whether only a configured operator may run the command.
    pub const fn requires_operator(&self) -> bool {
        matches!(
            self,
            Self::ToggleActivity { .. }
                | Self::AddFaction { .. }
                | Self::AddPlayer { .. }
                | Self::SetIncarcerated { .. }
                | Self::SetDead { .. }
                | Self::RefreshWithdrawals
                | Self::StartRound
                | Self::EndRound
        )
    }

    /// Whether the command only reads the snapshot.
    pub const fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::Balance { .. } | Self::VoteReport { .. } | Self::ListPlayers { .. }
        )
    }
}

/// Display name and id of a selectable player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// Platform id.
    pub player_id: PlayerId,
    /// Display name.
    pub player_discord_name: String,
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The global switch was set.
    ActivitySet {
        /// New value.
        is_active: bool,
    },
    /// A faction was registered.
    FactionAdded {
        /// The faction.
        faction_name: FactionName,
        /// Its starting holdings.
        assets: i64,
    },
    /// A player was registered.
    PlayerAdded {
        /// The player.
        player_id: PlayerId,
        /// Display name.
        display_name: String,
        /// Their faction.
        faction_name: FactionName,
    },
    /// A player's incarceration flag was set.
    IncarcerationSet {
        /// The player.
        player_id: PlayerId,
        /// New value.
        is_incarcerated: bool,
    },
    /// A player's death flag was set.
    DeathSet {
        /// The player.
        player_id: PlayerId,
        /// New value.
        is_dead: bool,
    },
    /// Daily withdrawals were restored.
    WithdrawalsRefreshed {
        /// How many players are now able to withdraw.
        refreshed: usize,
    },
    /// Assets moved from a stash into a faction.
    Deposited {
        /// Amount moved.
        amount: i64,
        /// Receiving faction.
        faction_name: FactionName,
        /// Actor's stash afterwards.
        player_assets: i64,
    },
    /// Assets moved from a faction into a stash.
    Withdrew {
        /// Amount moved.
        amount: i64,
        /// Debited faction.
        faction_name: FactionName,
        /// Actor's stash afterwards.
        player_assets: i64,
    },
    /// Assets moved between players.
    Transferred {
        /// Amount moved.
        amount: i64,
        /// Receiving player.
        receiver: PlayerId,
        /// Sender's stash afterwards.
        player_assets: i64,
    },
    /// Current holdings.
    Balance {
        /// Which holdings.
        of: BalanceKind,
        /// The faction, for faction holdings.
        faction_name: Option<FactionName>,
        /// The amount held.
        assets: i64,
    },
    /// A round was opened.
    RoundStarted {
        /// Its number.
        round_number: u64,
    },
    /// The latest round was closed.
    RoundEnded {
        /// Its number.
        round_number: u64,
        /// Whether it was open before this command.
        was_active: bool,
    },
    /// A vote was recorded or replaced.
    VoteCast {
        /// The round.
        round_number: u64,
        /// The recorded choice.
        choice: VoteChoice,
        /// Whether an earlier vote was replaced.
        replaced: bool,
    },
    /// The actor's vote was withdrawn.
    VoteRemoved {
        /// The round.
        round_number: u64,
        /// Whether there was a vote to remove.
        removed: bool,
    },
    /// A vote tally.
    VoteReport(VoteReport),
    /// Living players matching a filter.
    Players {
        /// At most the selection cap, ordered by name.
        players: Vec<PlayerSummary>,
    },
}

impl Outcome {
    /// Human-readable confirmation.
    pub fn message(&self) -> String {
        match self {
            Self::ActivitySet { is_active } => format!("Game state has been set to {is_active}!"),
            Self::FactionAdded {
                faction_name,
                assets,
            } => format!("Added faction {faction_name} to game with initial assets {assets}"),
            Self::PlayerAdded { display_name, .. } => format!("Added player {display_name} to game!"),
            Self::IncarcerationSet {
                player_id,
                is_incarcerated,
            } => format!("Set incarceration status of {player_id} to {is_incarcerated}!"),
            Self::DeathSet { player_id, is_dead } => {
                format!("Set dead status of {player_id} to {is_dead}!")
            }
            Self::WithdrawalsRefreshed { .. } => {
                "Refreshed the daily withdrawal allowance for all players!".to_owned()
            }
            Self::Deposited {
                amount,
                faction_name,
                player_assets,
            } => format!(
                "Deposited {amount} assets to {faction_name}. Current personal assets are {player_assets}"
            ),
            Self::Withdrew {
                amount,
                faction_name,
                player_assets,
            } => format!(
                "Withdrew {amount} assets from {faction_name} holdings! Current personal assets are {player_assets}"
            ),
            Self::Transferred {
                amount,
                receiver,
                player_assets,
            } => format!(
                "Transferred {amount} assets to {receiver}. Current personal assets are {player_assets}"
            ),
            Self::Balance {
                faction_name: Some(faction),
                assets,
                ..
            } => format!("Current faction holdings for Faction {faction} is {assets}"),
            Self::Balance { assets, .. } => format!("Current personal assets are {assets}"),
            Self::RoundStarted { round_number } => format!("Round {round_number} has started!"),
            Self::RoundEnded { round_number, .. } => format!("Round {round_number} has ended!"),
            Self::VoteCast {
                round_number,
                choice,
                ..
            } => format!("Vote for {} recorded in round {round_number}", choice.label()),
            Self::VoteRemoved {
                round_number,
                removed: true,
            } => format!("Vote removed from round {round_number}"),
            Self::VoteRemoved { round_number, .. } => {
                format!("No vote to remove in round {round_number}")
            }
            Self::VoteReport(report) => report.to_string(),
            Self::Players { players } => format!("{} matching players", players.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_deserializes_from_tagged_json() {
        let json = r#"{"actor": 42, "command": {"name": "deposit", "amount": 4}}"#;
        let intent: Result<CommandIntent, _> = serde_json::from_str(json);
        assert_eq!(
            intent.ok(),
            Some(CommandIntent::new(PlayerId(42), Command::Deposit { amount: 4 }))
        );
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"actor": 1, "command": {"name": "add-player", "player_id": 7,
            "display_name": "micah", "faction_name": "O'Driscoll Boys"}}"#;
        let intent: Result<CommandIntent, _> = serde_json::from_str(json);
        assert!(matches!(
            intent.map(|i| i.command),
            Ok(Command::AddPlayer {
                initial_assets: 0,
                withdraw_limit: None,
                is_faction_boss: false,
                ..
            })
        ));
    }

    #[test]
    fn vote_sentinel_uses_its_label() {
        let json = r#"{"name": "cast-vote", "sentinel": "No Vote"}"#;
        let command: Result<Command, _> = serde_json::from_str(json);
        assert_eq!(
            command.ok(),
            Some(Command::CastVote {
                target: None,
                sentinel: Some(Sentinel::NoVote)
            })
        );
    }

    #[test]
    fn unit_commands_round_trip() {
        let json = serde_json::to_string(&Command::RefreshWithdrawals).unwrap_or_default();
        assert_eq!(json, r#"{"name":"refresh-withdrawals"}"#);
    }

    #[test]
    fn read_only_commands() {
        assert!(Command::ListPlayers { filter: None }.is_read_only());
        assert!(!Command::EndRound.is_read_only());
        assert_eq!(Command::EndRound.name(), "end-round");
    }

    #[test]
    fn moderator_commands_need_an_operator() {
        assert!(
            Command::SetDead {
                player_id: PlayerId(3),
                dead: true
            }
            .requires_operator()
        );
        assert!(Command::ToggleActivity { active: false }.requires_operator());
        assert!(!Command::Deposit { amount: 1 }.requires_operator());
        assert!(!Command::VoteReport { round: None }.requires_operator());
    }
}
