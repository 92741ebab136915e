//! Relationship queries over the [`Game`] aggregate.
//!
//! All lookups are linear scans keyed by business identifiers; a game
//! session holds tens of players. "Not found" is an empty result, never
//! an error: callers branch on the `Option`.

use crate::enums::FactionName;
use crate::ids::PlayerId;
use crate::structs::{Faction, Game, Player, Round};

/// Maximum number of players returned by [`Game::living_players`].
///
/// Interactive selection lists cannot show more than this many entries;
/// longer result sets are truncated silently.
pub const SELECTION_CAP: usize = 25;

impl Game {
    /// Find a player by platform id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == id)
    }

    /// Mutable variant of [`Game::player`].
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.player_id == id)
    }

    /// Find a faction by name.
    pub fn faction(&self, name: FactionName) -> Option<&Faction> {
        self.factions.iter().find(|f| f.faction_name == name)
    }

    /// Mutable variant of [`Game::faction`].
    pub fn faction_mut(&mut self, name: FactionName) -> Option<&mut Faction> {
        self.factions.iter_mut().find(|f| f.faction_name == name)
    }

    /// The faction whose roster lists `id`.
    pub fn faction_of_player(&self, id: PlayerId) -> Option<&Faction> {
        self.factions.iter().find(|f| f.has_member(id))
    }

    /// Mutable variant of [`Game::faction_of_player`].
    pub fn faction_of_player_mut(&mut self, id: PlayerId) -> Option<&mut Faction> {
        self.factions.iter_mut().find(|f| f.has_member(id))
    }

    /// Find a round by number.
    pub fn round(&self, round_number: u64) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_number == round_number)
    }

    /// The round with the highest number, regardless of insertion order.
    pub fn latest_round(&self) -> Option<&Round> {
        self.rounds.iter().max_by_key(|r| r.round_number)
    }

    /// Mutable variant of [`Game::latest_round`].
    pub fn latest_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.iter_mut().max_by_key(|r| r.round_number)
    }

    /// Living players whose display name contains `filter`
    /// (case-insensitive), ordered by lowercased name then id and capped
    /// at [`SELECTION_CAP`].
    pub fn living_players(&self, filter: Option<&str>) -> Vec<&Player> {
        let needle = filter.map(str::to_lowercase).unwrap_or_default();
        let mut living: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| !p.is_dead)
            .filter(|p| p.player_discord_name.to_lowercase().contains(&needle))
            .collect();
        living.sort_by_cached_key(|p| (p.player_discord_name.to_lowercase(), p.player_id));
        living.truncate(SELECTION_CAP);
        living
    }

    /// Whether `id` is a registered, living player.
    pub fn is_living_player(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| !p.is_dead)
    }

    /// Sum of every player stash and every faction's holdings.
    ///
    /// Returns `None` on overflow.
    pub fn total_assets(&self) -> Option<i64> {
        let players = self
            .players
            .iter()
            .try_fold(0_i64, |acc, p| acc.checked_add(p.assets))?;
        self.factions
            .iter()
            .try_fold(players, |acc, f| acc.checked_add(f.assets))
    }
}
