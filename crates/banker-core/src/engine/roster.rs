//! Operator commands that shape the roster: the activity switch, factions,
//! players, and their status flags.
//!
//! None of these check `Game::is_active`: the operator configures the game
//! while it is switched off.

use banker_types::{Account, Faction, FactionName, Game, Player, PlayerId};

use super::{Applied, GameEngine, Movement, require_non_negative};
use crate::command::{Outcome, PlayerSummary};
use crate::error::Rejection;

/// Arguments of an add-player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    /// Platform id.
    pub player_id: PlayerId,
    /// Display name.
    pub display_name: String,
    /// The faction to join.
    pub faction_name: FactionName,
    /// Starting personal assets.
    pub initial_assets: i64,
    /// Per-withdrawal limit, the policy default when `None`.
    pub withdraw_limit: Option<i64>,
    /// Whether the player leads the faction.
    pub is_faction_boss: bool,
}

impl GameEngine {
    /// Set the global command switch. Always succeeds.
    pub fn toggle_activity(&self, game: &mut Game, active: bool) -> Result<Applied, Rejection> {
        game.is_active = active;
        Ok(Applied::new(Outcome::ActivitySet { is_active: active }))
    }

    /// Register a faction with an empty roster.
    pub fn add_faction(
        &self,
        game: &mut Game,
        faction_name: FactionName,
        initial_assets: i64,
    ) -> Result<Applied, Rejection> {
        if game.faction(faction_name).is_some() {
            return Err(Rejection::AlreadyExists(format!("faction {faction_name}")));
        }
        require_non_negative(initial_assets)?;

        game.factions.push(Faction::new(faction_name, initial_assets));
        Ok(Applied::new(Outcome::FactionAdded {
            faction_name,
            assets: initial_assets,
        })
        .with_movement(Movement::grant(
            Account::Faction(faction_name),
            initial_assets,
        )))
    }

    /// Register a player and append them to their faction's roster.
    ///
    /// Both writes happen together after every check has passed.
    pub fn add_player(&self, game: &mut Game, new: NewPlayer) -> Result<Applied, Rejection> {
        let NewPlayer {
            player_id,
            display_name,
            faction_name,
            initial_assets,
            withdraw_limit,
            is_faction_boss,
        } = new;

        if game.faction(faction_name).is_none() {
            return Err(Rejection::UnknownFaction(faction_name));
        }
        if let Some(existing) = game.faction_of_player(player_id) {
            return Err(Rejection::AlreadyInFaction {
                player_id,
                faction_name: existing.faction_name,
            });
        }
        if game.player(player_id).is_some() {
            return Err(Rejection::AlreadyExists(format!("player {player_id}")));
        }
        require_non_negative(initial_assets)?;
        let withdraw_limit = withdraw_limit.unwrap_or(self.policy.default_withdraw_limit);
        require_non_negative(withdraw_limit)?;

        let faction = game
            .faction_mut(faction_name)
            .ok_or(Rejection::UnknownFaction(faction_name))?;
        faction.player_ids.push(player_id);

        let mut player = Player::new(player_id, display_name.clone(), faction_name, initial_assets);
        player.withdraw_limit = withdraw_limit;
        player.is_faction_boss = is_faction_boss;
        game.players.push(player);

        tracing::debug!(
            player_id = %player_id,
            faction = %faction_name,
            assets = initial_assets,
            withdraw_limit,
            is_faction_boss,
            "Player added"
        );

        Ok(Applied::new(Outcome::PlayerAdded {
            player_id,
            display_name,
            faction_name,
        })
        .with_movement(Movement::grant(Account::Player(player_id), initial_assets)))
    }

    /// Set a player's incarceration flag. Idempotent.
    pub fn set_incarcerated(
        &self,
        game: &mut Game,
        player_id: PlayerId,
        incarcerated: bool,
    ) -> Result<Applied, Rejection> {
        let player = game
            .player_mut(player_id)
            .ok_or(Rejection::UnknownPlayer(player_id))?;
        player.is_incarcerated = incarcerated;
        Ok(Applied::new(Outcome::IncarcerationSet {
            player_id,
            is_incarcerated: incarcerated,
        }))
    }

    /// Set a player's death flag. Idempotent.
    pub fn set_dead(
        &self,
        game: &mut Game,
        player_id: PlayerId,
        dead: bool,
    ) -> Result<Applied, Rejection> {
        let player = game
            .player_mut(player_id)
            .ok_or(Rejection::UnknownPlayer(player_id))?;
        player.is_dead = dead;
        Ok(Applied::new(Outcome::DeathSet {
            player_id,
            is_dead: dead,
        }))
    }

    /// Restore the daily withdrawal of every free, living player.
    pub fn refresh_withdrawals(&self, game: &mut Game) -> Result<Applied, Rejection> {
        let mut refreshed: usize = 0;
        for player in game.players.iter_mut().filter(|p| !p.is_incapacitated()) {
            player.daily_withdraw_available = true;
            refreshed = refreshed.saturating_add(1);
        }
        Ok(Applied::new(Outcome::WithdrawalsRefreshed { refreshed }))
    }

    /// Living players whose name contains `filter`, for selection lists.
    pub fn list_players(&self, game: &Game, filter: Option<&str>) -> Result<Applied, Rejection> {
        let players = game
            .living_players(filter)
            .into_iter()
            .map(|p| PlayerSummary {
                player_id: p.player_id,
                player_discord_name: p.player_discord_name.clone(),
            })
            .collect();
        Ok(Applied::new(Outcome::Players { players }))
    }
}
