//! Snapshot codec: [`Game`] to persisted JSON and back.
//!
//! The layout is the one written by every version of the bot; missing
//! collections decode as empty so first-schema files load unchanged.

use std::path::Path;

use banker_types::Game;

use crate::error::DbError;

/// Encode a game as pretty-printed JSON (two-space indent).
///
/// # Errors
///
/// Returns [`DbError::Serialization`] if encoding fails.
pub fn encode(game: &Game) -> Result<String, DbError> {
    Ok(serde_json::to_string_pretty(game)?)
}

/// Decode a persisted snapshot.
///
/// # Errors
///
/// Returns [`DbError::EmptySnapshot`] for blank content and
/// [`DbError::Serialization`] for anything that is not a valid snapshot.
pub fn decode(contents: &str, origin: &Path) -> Result<Game, DbError> {
    if contents.trim().is_empty() {
        return Err(DbError::EmptySnapshot(origin.to_path_buf()));
    }
    Ok(serde_json::from_str(contents)?)
}

/// Check that a save of revision `new` may replace the persisted
/// revision `found`.
///
/// Revision `n` replaces `n - 1`. The first save (revision 1) may also
/// create the snapshot when none exists.
///
/// # Errors
///
/// Returns [`DbError::Conflict`] when another writer got there first.
pub fn check_revision(new: u64, found: Option<u64>) -> Result<(), DbError> {
    let expected = new.checked_sub(1);
    let ok = match (expected, found) {
        (Some(e), Some(f)) => e == f,
        (Some(0), None) => true,
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(DbError::Conflict { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use banker_types::{
        Faction, FactionName, Player, PlayerId, Round, Vote, VoteChoice, VoteTimestamp,
    };

    use super::*;

    fn sample_game() -> Game {
        let mut faction = Faction::new(FactionName::RobberBaronCornwall, 4);
        faction.player_ids.push(PlayerId(11));
        let mut round = Round::open(1);
        round.votes.push(Vote {
            player_id: PlayerId(11),
            choice: VoteChoice::NoVote,
            timestamp: VoteTimestamp::from_secs(1_700_000_000),
        });
        Game {
            is_active: true,
            factions: vec![faction],
            players: vec![Player::new(
                PlayerId(11),
                "sadie".to_owned(),
                FactionName::RobberBaronCornwall,
                6,
            )],
            rounds: vec![round],
            revision: 3,
        }
    }

    #[test]
    fn encode_decode_encode_is_stable() {
        let game = sample_game();
        let first = encode(&game).unwrap_or_default();
        let decoded = decode(&first, Path::new("mem"));
        assert_eq!(decoded.as_ref().ok(), Some(&game));
        let second = decoded.ok().map(|g| encode(&g).unwrap_or_default());
        assert_eq!(second.as_deref(), Some(first.as_str()));
    }

    #[test]
    fn first_schema_snapshot_loads_without_rounds() {
        let json = r#"{
          "is_active": true,
          "factions": [
            {"player_ids": [1], "faction_name": "Del Lobo Gang", "assets": 5}
          ],
          "players": [
            {"player_id": 1, "player_discord_name": "javier", "faction_name": "Del Lobo Gang",
             "assets": 2, "withdraw_limit": 2, "daily_withdraw_available": false,
             "is_faction_boss": true, "is_incarcerated": false, "is_dead": false}
          ]
        }"#;
        let game = decode(json, Path::new("legacy.json"));
        assert!(game.is_ok());
        if let Ok(g) = game {
            assert!(g.rounds.is_empty());
            assert_eq!(g.revision, 0);
            assert_eq!(g.players.first().map(|p| p.tension), Some(0));
        }
    }

    #[test]
    fn blank_snapshot_is_an_error() {
        assert!(matches!(
            decode("  \n", Path::new("game.json")),
            Err(DbError::EmptySnapshot(_))
        ));
    }

    #[test]
    fn garbage_snapshot_is_an_error() {
        assert!(matches!(
            decode("{\"players\": 7}", Path::new("game.json")),
            Err(DbError::Serialization(_))
        ));
    }

    #[test]
    fn revision_rules() {
        assert!(check_revision(1, None).is_ok());
        assert!(check_revision(1, Some(0)).is_ok());
        assert!(check_revision(5, Some(4)).is_ok());
        assert!(check_revision(5, Some(5)).is_err());
        assert!(check_revision(5, None).is_err());
        assert!(check_revision(0, None).is_err());
    }
}
