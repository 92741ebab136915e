//! Core entity structs for the Banker game.
//!
//! The [`Game`] aggregate is the unit of persistence: it owns every
//! faction, player and round by value. Cross references (player to
//! faction, vote to player) are keys resolved by lookup, never live
//! references, so the aggregate serializes without cycles.
//!
//! Field names match the persisted snapshot layout. Collections and
//! fields introduced after the first schema version carry serde defaults
//! so older snapshots load unchanged. Older writers also emit `null` for
//! fields they never set; those read as the default too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{EntityType, FactionName, LedgerEntryType, VoteChoice};
use crate::ids::{LedgerEntryId, PlayerId};

/// Withdraw limit given to players whose record does not specify one.
pub const DEFAULT_WITHDRAW_LIMIT: i64 = 2;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A registered player.
///
/// Players are never removed; death and incarceration are soft states
/// that keep the record (and its history) in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Platform user id.
    pub player_id: PlayerId,
    /// Display name captured when the player was added.
    pub player_discord_name: String,
    /// Faction the player was assigned to.
    pub faction_name: FactionName,
    /// Personal stash.
    pub assets: i64,
    /// Narrative tension score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tension: i64,
    /// Largest single withdrawal allowed when limit enforcement is on.
    #[serde(default = "default_withdraw_limit", deserialize_with = "null_as_withdraw_limit")]
    pub withdraw_limit: i64,
    /// Whether the daily withdrawal allowance is still unused.
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub daily_withdraw_available: bool,
    /// Faction bosses may inspect faction holdings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_faction_boss: bool,
    /// Incarcerated players cannot move assets.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_incarcerated: bool,
    /// Dead players cannot move assets or vote.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_dead: bool,
}

impl Player {
    /// Create a fresh player with default allowance and status flags.
    pub fn new(
        player_id: PlayerId,
        player_discord_name: String,
        faction_name: FactionName,
        assets: i64,
    ) -> Self {
        Self {
            player_id,
            player_discord_name,
            faction_name,
            assets,
            tension: 0,
            withdraw_limit: DEFAULT_WITHDRAW_LIMIT,
            daily_withdraw_available: true,
            is_faction_boss: false,
            is_incarcerated: false,
            is_dead: false,
        }
    }

    /// Dead or incarcerated players cannot take part in asset movements.
    pub const fn is_incapacitated(&self) -> bool {
        self.is_dead || self.is_incarcerated
    }
}

// ---------------------------------------------------------------------------
// Faction
// ---------------------------------------------------------------------------

/// A team holding pooled assets and a roster of member ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    /// Unique faction key.
    pub faction_name: FactionName,
    /// Member player ids (back-references, not ownership).
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_ids: Vec<PlayerId>,
    /// Pooled holdings.
    pub assets: i64,
}

impl Faction {
    /// Create a faction with an empty roster.
    pub const fn new(faction_name: FactionName, assets: i64) -> Self {
        Self {
            faction_name,
            player_ids: Vec::new(),
            assets,
        }
    }

    /// Whether the given player is on this faction's roster.
    pub fn has_member(&self, player_id: PlayerId) -> bool {
        self.player_ids.contains(&player_id)
    }
}

// ---------------------------------------------------------------------------
// Vote / Round
// ---------------------------------------------------------------------------

/// One player's current choice within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The voter.
    pub player_id: PlayerId,
    /// Target player id or the abstention sentinel.
    pub choice: VoteChoice,
    /// Wall-clock seconds when the vote was last committed.
    pub timestamp: VoteTimestamp,
}

/// Wall-clock seconds of a vote.
///
/// New votes are stamped with whole seconds. Values read from a snapshot
/// are kept exactly as written, fractional seconds included, so a load and
/// save never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTimestamp(serde_json::Number);

impl VoteTimestamp {
    /// A timestamp of whole Unix seconds.
    pub fn from_secs(secs: i64) -> Self {
        Self(serde_json::Number::from(secs))
    }

    /// Whole seconds, truncating any fraction.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_secs(&self) -> Option<i64> {
        if let Some(secs) = self.0.as_i64() {
            return Some(secs);
        }
        self.0
            .as_f64()
            .filter(|secs| secs.is_finite())
            .map(|secs| secs.trunc() as i64)
    }

    /// The value as stored.
    pub const fn as_number(&self) -> &serde_json::Number {
        &self.0
    }
}

impl From<i64> for VoteTimestamp {
    fn from(secs: i64) -> Self {
        Self::from_secs(secs)
    }
}

/// A numbered voting phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based, strictly increasing across the game.
    pub round_number: u64,
    /// At most one round in a game is active.
    pub is_active_round: bool,
    /// At most one vote per player.
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: Vec<Vote>,
}

impl Round {
    /// Open a new active round with no votes.
    pub const fn open(round_number: u64) -> Self {
        Self {
            round_number,
            is_active_round: true,
            votes: Vec::new(),
        }
    }

    /// The vote currently held by `player_id`, if any.
    pub fn vote_of(&self, player_id: PlayerId) -> Option<&Vote> {
        self.votes.iter().find(|v| v.player_id == player_id)
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// The top-level aggregate, loaded and saved wholesale per command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Global switch for player-facing commands.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    /// All factions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub factions: Vec<Faction>,
    /// All registered players.
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<Player>,
    /// All rounds, in creation order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rounds: Vec<Round>,
    /// Version stamp bumped on every persisted mutation.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub revision: u64,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// One side of an asset movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum Account {
    /// The game master's bank.
    Bank,
    /// A player's stash.
    Player(PlayerId),
    /// A faction's holdings.
    Faction(FactionName),
}

impl Account {
    /// The entity kind of this account.
    pub const fn entity_type(self) -> EntityType {
        match self {
            Self::Bank => EntityType::Bank,
            Self::Player(_) => EntityType::Player,
            Self::Faction(_) => EntityType::Faction,
        }
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bank => f.write_str("bank"),
            Self::Player(id) => write!(f, "player:{id}"),
            Self::Faction(name) => write!(f, "faction:{name}"),
        }
    }
}

/// A validated record of a single asset movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique entry id.
    pub id: LedgerEntryId,
    /// Movement classification.
    pub entry_type: LedgerEntryType,
    /// Debited account.
    pub from: Account,
    /// Credited account.
    pub to: Account,
    /// Strictly positive amount moved.
    pub amount: i64,
    /// Game revision the movement was committed under.
    pub revision: u64,
    /// Wall-clock time the entry was built.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

const fn default_withdraw_limit() -> i64 {
    DEFAULT_WITHDRAW_LIMIT
}

const fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Read an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_withdraw_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_WITHDRAW_LIMIT))
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_schema_player_gets_defaults() {
        let json = r#"{
            "player_id": 5,
            "player_discord_name": "arthur",
            "faction_name": "Van der Linde Gang",
            "assets": 3
        }"#;
        let player: Result<Player, _> = serde_json::from_str(json);
        assert!(player.is_ok());
        if let Ok(p) = player {
            assert_eq!(p.tension, 0);
            assert_eq!(p.withdraw_limit, DEFAULT_WITHDRAW_LIMIT);
            assert!(p.daily_withdraw_available);
            assert!(!p.is_incapacitated());
        }
    }

    #[test]
    fn fractional_vote_timestamp_survives_a_resave() {
        let json = r#"{"player_id":1,"choice":"No Vote","timestamp":1700000000.75}"#;
        let vote: Result<Vote, _> = serde_json::from_str(json);
        let vote = vote.ok();
        assert_eq!(
            vote.as_ref().and_then(|v| v.timestamp.as_secs()),
            Some(1_700_000_000)
        );
        let written = vote.and_then(|v| serde_json::to_string(&v).ok());
        assert_eq!(written.as_deref(), Some(json));
    }

    #[test]
    fn new_vote_timestamps_are_whole_seconds() {
        let stamp = VoteTimestamp::from_secs(1_700_000_000);
        assert_eq!(stamp.as_number().to_string(), "1700000000");
        assert_eq!(stamp.as_secs(), Some(1_700_000_000));
    }

    #[test]
    fn null_fields_from_older_writers_read_as_defaults() {
        let json = r#"{
            "player_id": 5,
            "player_discord_name": "arthur",
            "faction_name": "Van der Linde Gang",
            "assets": 3,
            "tension": null,
            "withdraw_limit": null,
            "daily_withdraw_available": null,
            "is_faction_boss": null,
            "is_incarcerated": null,
            "is_dead": null
        }"#;
        let player: Result<Player, _> = serde_json::from_str(json);
        assert_eq!(
            player.ok(),
            Some(Player::new(
                PlayerId(5),
                "arthur".to_owned(),
                FactionName::VanDerLindeGang,
                3
            ))
        );

        let game: Result<Game, _> = serde_json::from_str(
            r#"{"is_active": null, "factions": null, "players": null, "rounds": null}"#,
        );
        assert_eq!(game.ok(), Some(Game::default()));
    }

    #[test]
    fn zero_revision_is_omitted() {
        let json = serde_json::to_value(Game::default()).ok();
        assert!(json.as_ref().is_some_and(|v| v.get("revision").is_none()));
        assert!(json.as_ref().is_some_and(|v| v.get("rounds").is_some()));
    }

    #[test]
    fn incapacitated_covers_both_flags() {
        let mut p = Player::new(PlayerId(1), "a".to_owned(), FactionName::DelLoboGang, 0);
        p.is_incarcerated = true;
        assert!(p.is_incapacitated());
        p.is_incarcerated = false;
        p.is_dead = true;
        assert!(p.is_incapacitated());
    }
}
