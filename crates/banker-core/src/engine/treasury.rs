//! Asset movements between player stashes and faction holdings.
//!
//! Every movement conserves the game's total holdings. Checks run in a
//! fixed order so the same bad request always yields the same rejection.

use banker_types::{Account, BalanceKind, Game, LedgerEntryType, PlayerId};

use super::{Applied, GameEngine, Movement, credit, debit, require_active, require_non_negative};
use crate::command::Outcome;
use crate::error::Rejection;

impl GameEngine {
    /// Move `amount` from the actor's stash into their faction's holdings.
    pub fn deposit(
        &self,
        game: &mut Game,
        actor: PlayerId,
        amount: i64,
    ) -> Result<Applied, Rejection> {
        require_active(game)?;
        let player = game.player(actor).ok_or(Rejection::UnknownPlayer(actor))?;
        let faction = game.faction_of_player(actor).ok_or(Rejection::NoFaction(actor))?;
        if player.is_incapacitated() {
            return Err(Rejection::Incapacitated(actor));
        }
        require_non_negative(amount)?;

        let player_assets = debit(player.assets, amount)?;
        let faction_assets = credit(faction.assets, amount)?;
        let faction_name = faction.faction_name;

        if let Some(f) = game.faction_of_player_mut(actor) {
            f.assets = faction_assets;
        }
        if let Some(p) = game.player_mut(actor) {
            p.assets = player_assets;
        }

        Ok(Applied::new(Outcome::Deposited {
            amount,
            faction_name,
            player_assets,
        })
        .with_movement(Movement::new(
            LedgerEntryType::Deposit,
            Account::Player(actor),
            Account::Faction(faction_name),
            amount,
        )))
    }

    /// Move `amount` from the actor's faction into their stash, consuming
    /// the daily withdrawal.
    pub fn withdraw(
        &self,
        game: &mut Game,
        actor: PlayerId,
        amount: i64,
    ) -> Result<Applied, Rejection> {
        require_active(game)?;
        let player = game.player(actor).ok_or(Rejection::UnknownPlayer(actor))?;
        let faction = game.faction_of_player(actor).ok_or(Rejection::NoFaction(actor))?;
        if player.is_incapacitated() {
            return Err(Rejection::Incapacitated(actor));
        }
        require_non_negative(amount)?;

        let faction_assets = debit(faction.assets, amount)?;
        if !player.daily_withdraw_available {
            return Err(Rejection::WithdrawalExhausted(actor));
        }
        if self.policy.enforce_withdraw_limit && amount > player.withdraw_limit {
            return Err(Rejection::WithdrawalExceedsLimit {
                amount,
                limit: player.withdraw_limit,
            });
        }
        let player_assets = credit(player.assets, amount)?;
        let faction_name = faction.faction_name;

        if let Some(f) = game.faction_of_player_mut(actor) {
            f.assets = faction_assets;
        }
        if let Some(p) = game.player_mut(actor) {
            p.assets = player_assets;
            p.daily_withdraw_available = false;
        }

        Ok(Applied::new(Outcome::Withdrew {
            amount,
            faction_name,
            player_assets,
        })
        .with_movement(Movement::new(
            LedgerEntryType::Withdraw,
            Account::Faction(faction_name),
            Account::Player(actor),
            amount,
        )))
    }

    /// Move `amount` from the actor's stash to `receiver`'s stash.
    pub fn transfer(
        &self,
        game: &mut Game,
        actor: PlayerId,
        receiver: PlayerId,
        amount: i64,
    ) -> Result<Applied, Rejection> {
        require_active(game)?;
        let sender = game.player(actor).ok_or(Rejection::UnknownPlayer(actor))?;
        let recipient = game
            .player(receiver)
            .ok_or(Rejection::UnknownPlayer(receiver))?;
        if sender.is_incapacitated() {
            return Err(Rejection::IncapacitatedParty(actor));
        }
        if recipient.is_incapacitated() {
            return Err(Rejection::IncapacitatedParty(receiver));
        }
        require_non_negative(amount)?;

        let sender_assets = debit(sender.assets, amount)?;
        if actor == receiver {
            // Sending to yourself moves nothing.
            return Ok(Applied::new(Outcome::Transferred {
                amount,
                receiver,
                player_assets: sender.assets,
            }));
        }
        let receiver_assets = credit(recipient.assets, amount)?;

        if let Some(p) = game.player_mut(actor) {
            p.assets = sender_assets;
        }
        if let Some(p) = game.player_mut(receiver) {
            p.assets = receiver_assets;
        }

        Ok(Applied::new(Outcome::Transferred {
            amount,
            receiver,
            player_assets: sender_assets,
        })
        .with_movement(Movement::new(
            LedgerEntryType::Transfer,
            Account::Player(actor),
            Account::Player(receiver),
            amount,
        )))
    }

    /// Report the actor's stash, or their faction's holdings for bosses.
    pub fn balance(
        &self,
        game: &Game,
        actor: PlayerId,
        of: BalanceKind,
    ) -> Result<Applied, Rejection> {
        require_active(game)?;
        let player = game.player(actor).ok_or(Rejection::UnknownPlayer(actor))?;
        let outcome = match of {
            BalanceKind::Player => Outcome::Balance {
                of,
                faction_name: None,
                assets: player.assets,
            },
            BalanceKind::Faction => {
                if !player.is_faction_boss {
                    return Err(Rejection::NotFactionBoss(actor));
                }
                let faction = game.faction_of_player(actor).ok_or(Rejection::NoFaction(actor))?;
                Outcome::Balance {
                    of,
                    faction_name: Some(faction.faction_name),
                    assets: faction.assets,
                }
            }
        };
        Ok(Applied::new(outcome))
    }
}
