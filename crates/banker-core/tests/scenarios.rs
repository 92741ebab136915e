//! End-to-end game scenarios through the game service.
//!
//! Each scenario runs against a real JSON snapshot in a temporary
//! directory, so every command goes through load, apply, audit, and save.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use banker_core::{
    Command, CommandError, CommandIntent, GameEngine, GameService, Outcome, Policy, Rejection,
    ServiceError,
};
use banker_db::{JsonFileStore, SnapshotStore};
use banker_types::{BalanceKind, FactionName, PlayerId, Sentinel, VoteChoice};

const OPERATOR: PlayerId = PlayerId(100);
const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);
const CORNWALL: FactionName = FactionName::RobberBaronCornwall;

fn clock() -> i64 {
    1_712_345_678
}

struct Table {
    _dir: tempfile::TempDir,
    store: JsonFileStore,
    service: GameService<JsonFileStore>,
}

impl Table {
    fn new(enforce_withdraw_limit: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("game.json"));
        let engine = GameEngine::new(Policy {
            default_withdraw_limit: 2,
            enforce_withdraw_limit,
        });
        let service = GameService::new(store.clone(), engine)
            .with_clock(clock)
            .with_operators([OPERATOR]);
        Self {
            _dir: dir,
            store,
            service,
        }
    }

    async fn run(&mut self, actor: PlayerId, command: Command) -> Result<Outcome, CommandError> {
        self.service
            .execute(&CommandIntent::new(actor, command))
            .await
    }

    async fn ok(&mut self, actor: PlayerId, command: Command) -> Outcome {
        self.run(actor, command).await.unwrap()
    }

    async fn rejected(&mut self, actor: PlayerId, command: Command) -> Rejection {
        match self.run(actor, command).await {
            Err(CommandError::Rejected(r)) => r,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    /// Cornwall with 0 assets, P1 holding 10 in it, game switched on.
    async fn cornwall(enforce_withdraw_limit: bool) -> Self {
        let mut table = Self::new(enforce_withdraw_limit);
        table
            .ok(OPERATOR, Command::ToggleActivity { active: true })
            .await;
        table
            .ok(
                OPERATOR,
                Command::AddFaction {
                    faction_name: CORNWALL,
                    initial_assets: 0,
                },
            )
            .await;
        table
            .ok(
                OPERATOR,
                Command::AddPlayer {
                    player_id: P1,
                    display_name: "hosea".to_owned(),
                    faction_name: CORNWALL,
                    initial_assets: 10,
                    withdraw_limit: None,
                    is_faction_boss: true,
                },
            )
            .await;
        table
    }

    async fn assets(&self) -> (i64, i64) {
        let game = self.store.load().await.unwrap().unwrap();
        let player = game.player(P1).unwrap().assets;
        let faction = game.faction(CORNWALL).unwrap().assets;
        (player, faction)
    }
}

#[tokio::test]
async fn deposit_then_withdraw_without_limit_enforcement() {
    let mut table = Table::cornwall(false).await;

    table.ok(P1, Command::Deposit { amount: 4 }).await;
    assert_eq!(table.assets().await, (6, 4));

    table.ok(P1, Command::Withdraw { amount: 3 }).await;
    assert_eq!(table.assets().await, (9, 1));
}

#[tokio::test]
async fn withdraw_over_limit_is_rejected_when_enforced() {
    let mut table = Table::cornwall(true).await;

    table.ok(P1, Command::Deposit { amount: 4 }).await;
    let rejection = table.rejected(P1, Command::Withdraw { amount: 3 }).await;
    assert_eq!(
        rejection,
        Rejection::WithdrawalExceedsLimit {
            amount: 3,
            limit: 2
        }
    );
    assert_eq!(table.assets().await, (6, 4));
}

#[tokio::test]
async fn exhausted_withdrawal_leaves_state_unchanged() {
    let mut table = Table::cornwall(false).await;
    table.ok(P1, Command::Deposit { amount: 4 }).await;
    table.ok(P1, Command::Withdraw { amount: 1 }).await;
    let revision = table.store.load().await.unwrap().unwrap().revision;

    let rejection = table.rejected(P1, Command::Withdraw { amount: 1 }).await;
    assert_eq!(rejection, Rejection::WithdrawalExhausted(P1));

    let game = table.store.load().await.unwrap().unwrap();
    assert_eq!(game.revision, revision);
    assert_eq!(table.assets().await, (7, 3));

    table.ok(OPERATOR, Command::RefreshWithdrawals).await;
    table.ok(P1, Command::Withdraw { amount: 1 }).await;
    assert_eq!(table.assets().await, (8, 2));
}

#[tokio::test]
async fn transfer_beyond_stash_changes_no_balances() {
    let mut table = Table::cornwall(false).await;
    table
        .ok(
            OPERATOR,
            Command::AddPlayer {
                player_id: P2,
                display_name: "lenny".to_owned(),
                faction_name: CORNWALL,
                initial_assets: 5,
                withdraw_limit: None,
                is_faction_boss: false,
            },
        )
        .await;

    let rejection = table
        .rejected(
            P2,
            Command::Transfer {
                receiver: P1,
                amount: 10,
            },
        )
        .await;
    assert_eq!(
        rejection,
        Rejection::InsufficientFunds {
            requested: 10,
            available: 5
        }
    );
    let game = table.store.load().await.unwrap().unwrap();
    assert_eq!(game.player(P1).unwrap().assets, 10);
    assert_eq!(game.player(P2).unwrap().assets, 5);
}

#[tokio::test]
async fn round_lifecycle_and_voting() {
    let mut table = Table::cornwall(false).await;

    assert!(matches!(
        table.ok(OPERATOR, Command::StartRound).await,
        Outcome::RoundStarted { round_number: 1 }
    ));
    assert_eq!(
        table.rejected(OPERATOR, Command::StartRound).await,
        Rejection::RoundAlreadyActive(1)
    );

    table
        .ok(
            P1,
            Command::CastVote {
                target: Some(P1),
                sentinel: None,
            },
        )
        .await;
    table
        .ok(
            P1,
            Command::CastVote {
                target: None,
                sentinel: Some(Sentinel::NoVote),
            },
        )
        .await;

    table.ok(OPERATOR, Command::EndRound).await;
    assert!(matches!(
        table.ok(OPERATOR, Command::StartRound).await,
        Outcome::RoundStarted { round_number: 2 }
    ));

    let game = table.store.load().await.unwrap().unwrap();
    let round_one = game.round(1).unwrap();
    assert!(!round_one.is_active_round);
    assert_eq!(round_one.votes.len(), 1);
    assert_eq!(round_one.votes[0].choice, VoteChoice::NoVote);
    assert_eq!(round_one.votes[0].timestamp.as_secs(), Some(clock()));
    assert!(game.round(2).unwrap().is_active_round);

    let report = table
        .ok(OPERATOR, Command::VoteReport { round: Some(1) })
        .await;
    assert!(matches!(
        report,
        Outcome::VoteReport(ref r) if r.tallies.len() == 1 && r.tallies[0].choice == "No Vote"
    ));
}

#[tokio::test]
async fn inactive_game_rejects_player_commands_but_not_the_operator() {
    let mut table = Table::cornwall(false).await;
    table
        .ok(OPERATOR, Command::ToggleActivity { active: false })
        .await;

    assert_eq!(
        table
            .rejected(
                P1,
                Command::Balance {
                    of: BalanceKind::Player
                }
            )
            .await,
        Rejection::Inactive
    );
    assert!(matches!(
        table.ok(OPERATOR, Command::StartRound).await,
        Outcome::RoundStarted { .. }
    ));
}

#[tokio::test]
async fn journal_tracks_grants_and_movements() {
    let mut table = Table::cornwall(false).await;
    table.ok(P1, Command::Deposit { amount: 4 }).await;
    table.ok(P1, Command::Deposit { amount: 0 }).await;

    // One grant for P1's starting assets, one deposit; zero amounts and
    // a zero-asset faction record nothing.
    assert_eq!(table.service.ledger().len(), 2);
}

#[tokio::test]
async fn external_write_between_commands_is_detected() {
    let mut table = Table::cornwall(false).await;

    // Another process commits on top of the same snapshot.
    let mut game = table.store.load().await.unwrap().unwrap();
    game.revision += 1;
    game.is_active = false;
    table.store.save(&game).await.unwrap();

    // The service reloads before every command, so it sees the change.
    assert_eq!(
        table.rejected(P1, Command::Deposit { amount: 1 }).await,
        Rejection::Inactive
    );
}

#[tokio::test]
async fn corrupt_snapshot_is_an_infrastructure_failure() {
    let mut table = Table::new(false);
    std::fs::write(table.store.path(), "   ").unwrap();
    let result = table
        .run(OPERATOR, Command::ToggleActivity { active: true })
        .await;
    assert!(matches!(
        result,
        Err(CommandError::Service(ServiceError::Store(_)))
    ));
}

#[tokio::test]
async fn players_cannot_run_moderator_commands() {
    let mut table = Table::cornwall(false).await;

    assert_eq!(
        table
            .rejected(
                P1,
                Command::SetDead {
                    player_id: P1,
                    dead: true
                }
            )
            .await,
        Rejection::NotOperator(P1)
    );
    assert_eq!(
        table
            .rejected(P1, Command::ToggleActivity { active: false })
            .await,
        Rejection::NotOperator(P1)
    );

    let game = table.store.load().await.unwrap().unwrap();
    assert!(game.is_active);
    assert!(!game.player(P1).unwrap().is_dead);

    // Player commands are unaffected.
    table.ok(P1, Command::Deposit { amount: 1 }).await;
}
