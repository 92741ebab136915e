//! Routes a [`CommandIntent`] to the engine operation it names.

use banker_types::Game;

use crate::command::{Command, CommandIntent};
use crate::engine::roster::NewPlayer;
use crate::engine::{Applied, GameEngine};
use crate::error::Rejection;

/// Apply one command to `game`.
///
/// `now` is the commit time in Unix seconds, stamped on votes. Read-only
/// commands never modify `game`.
pub fn dispatch(
    engine: &GameEngine,
    game: &mut Game,
    intent: &CommandIntent,
    now: i64,
) -> Result<Applied, Rejection> {
    let actor = intent.actor;
    match &intent.command {
        Command::ToggleActivity { active } => engine.toggle_activity(game, *active),
        Command::AddFaction {
            faction_name,
            initial_assets,
        } => engine.add_faction(game, *faction_name, *initial_assets),
        Command::AddPlayer {
            player_id,
            display_name,
            faction_name,
            initial_assets,
            withdraw_limit,
            is_faction_boss,
        } => engine.add_player(
            game,
            NewPlayer {
                player_id: *player_id,
                display_name: display_name.clone(),
                faction_name: *faction_name,
                initial_assets: *initial_assets,
                withdraw_limit: *withdraw_limit,
                is_faction_boss: *is_faction_boss,
            },
        ),
        Command::SetIncarcerated {
            player_id,
            incarcerated,
        } => engine.set_incarcerated(game, *player_id, *incarcerated),
        Command::SetDead { player_id, dead } => engine.set_dead(game, *player_id, *dead),
        Command::RefreshWithdrawals => engine.refresh_withdrawals(game),
        Command::Deposit { amount } => engine.deposit(game, actor, *amount),
        Command::Withdraw { amount } => engine.withdraw(game, actor, *amount),
        Command::Transfer { receiver, amount } => engine.transfer(game, actor, *receiver, *amount),
        Command::Balance { of } => engine.balance(game, actor, *of),
        Command::StartRound => engine.start_round(game),
        Command::EndRound => engine.end_round(game),
        Command::CastVote { target, sentinel } => {
            engine.cast_vote(game, actor, *target, *sentinel, now)
        }
        Command::VoteReport { round } => engine.vote_report(game, *round),
        Command::ListPlayers { filter } => engine.list_players(game, filter.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use banker_types::{BalanceKind, FactionName, PlayerId};

    use super::*;
    use crate::command::Outcome;

    fn run(game: &mut Game, actor: u64, command: Command) -> Result<Applied, Rejection> {
        dispatch(
            &GameEngine::default(),
            game,
            &CommandIntent::new(PlayerId(actor), command),
            1_700_000_000,
        )
    }

    #[test]
    fn operator_setup_then_player_commands() {
        let mut game = Game::default();
        assert!(run(&mut game, 0, Command::ToggleActivity { active: true }).is_ok());
        assert!(
            run(
                &mut game,
                0,
                Command::AddFaction {
                    faction_name: FactionName::PinkertonDetectiveAgency,
                    initial_assets: 3,
                }
            )
            .is_ok()
        );
        assert!(
            run(
                &mut game,
                0,
                Command::AddPlayer {
                    player_id: PlayerId(5),
                    display_name: "milton".to_owned(),
                    faction_name: FactionName::PinkertonDetectiveAgency,
                    initial_assets: 4,
                    withdraw_limit: None,
                    is_faction_boss: true,
                }
            )
            .is_ok()
        );

        let deposit = run(&mut game, 5, Command::Deposit { amount: 4 });
        assert!(deposit.is_ok());
        let balance = run(
            &mut game,
            5,
            Command::Balance {
                of: BalanceKind::Faction,
            },
        );
        assert!(matches!(
            balance.map(|a| a.outcome),
            Ok(Outcome::Balance { assets: 7, .. })
        ));
    }

    #[test]
    fn vote_carries_the_commit_time() {
        let mut game = Game {
            is_active: true,
            ..Game::default()
        };
        let _ = run(
            &mut game,
            0,
            Command::AddFaction {
                faction_name: FactionName::DelLoboGang,
                initial_assets: 0,
            },
        );
        let _ = run(
            &mut game,
            0,
            Command::AddPlayer {
                player_id: PlayerId(8),
                display_name: "bill".to_owned(),
                faction_name: FactionName::DelLoboGang,
                initial_assets: 0,
                withdraw_limit: Some(3),
                is_faction_boss: false,
            },
        );
        let _ = run(&mut game, 0, Command::StartRound);
        let cast = run(
            &mut game,
            8,
            Command::CastVote {
                target: Some(PlayerId(8)),
                sentinel: None,
            },
        );
        assert!(cast.is_ok());
        let stamp = game
            .latest_round()
            .and_then(|r| r.vote_of(PlayerId(8)))
            .and_then(|v| v.timestamp.as_secs());
        assert_eq!(stamp, Some(1_700_000_000));
        assert_eq!(game.player(PlayerId(8)).map(|p| p.withdraw_limit), Some(3));
    }
}
