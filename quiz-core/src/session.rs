//! The client's record of which game it is playing and as whom.
//!
//! A [`Session`] only exists once a game has been created, so "game id set
//! but player unset" is unrepresentable: callers hold an `Option<Session>`.

use thiserror::Error;
use zimble_quiz_types::{GameId, GameSnapshot, PlayerId};

/// Errors building a session from a creation response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The server created a game without players.
    #[error("game {game_id} was created without players")]
    NoPlayers {
        /// The game that came back empty.
        game_id: GameId,
    },

    /// The explicit player order names a player missing from `players`.
    #[error("player order names unknown player {player_id}")]
    UnknownPlayer {
        /// The id that has no roster entry.
        player_id: PlayerId,
    },
}

/// Active game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    game_id: GameId,
    controlled_player: PlayerId,
    known_players: Vec<PlayerId>,
}

impl Session {
    /// Build a session from the response of a create-game call.
    ///
    /// The controlled player is the first entry of `playerOrder` when the
    /// server sends a non-empty one, otherwise the first key of `players` in
    /// document order.
    pub fn from_created(game: &GameSnapshot) -> Result<Self, SessionError> {
        if game.players.is_empty() {
            return Err(SessionError::NoPlayers {
                game_id: game.id.clone(),
            });
        }

        let known_players = match game.player_order.as_deref() {
            Some(order) if !order.is_empty() => {
                if let Some(missing) = order.iter().find(|id| !game.players.contains(id)) {
                    return Err(SessionError::UnknownPlayer {
                        player_id: missing.clone(),
                    });
                }
                order.to_vec()
            }
            _ => game.players.ids(),
        };

        Ok(Self {
            game_id: game.id.clone(),
            controlled_player: known_players[0].clone(),
            known_players,
        })
    }

    /// The game being played.
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// The player this client acts as. Fixed for the lifetime of the session.
    pub fn controlled_player(&self) -> &PlayerId {
        &self.controlled_player
    }

    /// All players known at creation time, in order.
    pub fn known_players(&self) -> &[PlayerId] {
        &self.known_players
    }

    /// True if `id` is the controlled player.
    pub fn is_controlled(&self, id: &PlayerId) -> bool {
        &self.controlled_player == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zimble_quiz_types::{GameStatus, Player, Roster};

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s).unwrap()
    }

    fn created(players: &[(&str, &str)]) -> GameSnapshot {
        GameSnapshot {
            id: GameId::new("g1").unwrap(),
            status: GameStatus::InProgress,
            players: Roster::new(
                players
                    .iter()
                    .map(|(id, name)| Player::new(pid(id), *name, 0)),
            ),
            current_question_index: None,
            player_order: None,
        }
    }

    #[test]
    fn controls_first_listed_player() {
        let session = Session::from_created(&created(&[("p1", "Alice"), ("p2", "Bob")])).unwrap();

        assert_eq!(session.game_id().as_str(), "g1");
        assert_eq!(session.controlled_player(), &pid("p1"));
        assert_eq!(session.known_players(), &[pid("p1"), pid("p2")]);
        assert!(session.is_controlled(&pid("p1")));
        assert!(!session.is_controlled(&pid("p2")));
    }

    #[test]
    fn first_key_is_document_order_not_lexical() {
        let session = Session::from_created(&created(&[("zz", "Zed"), ("aa", "Amy")])).unwrap();
        assert_eq!(session.controlled_player(), &pid("zz"));
    }

    #[test]
    fn explicit_order_wins() {
        let mut game = created(&[("p1", "Alice"), ("p2", "Bob")]);
        game.player_order = Some(vec![pid("p2"), pid("p1")]);

        let session = Session::from_created(&game).unwrap();
        assert_eq!(session.controlled_player(), &pid("p2"));
        assert_eq!(session.known_players(), &[pid("p2"), pid("p1")]);
    }

    #[test]
    fn empty_explicit_order_falls_back_to_keys() {
        let mut game = created(&[("p1", "Alice")]);
        game.player_order = Some(vec![]);

        let session = Session::from_created(&game).unwrap();
        assert_eq!(session.controlled_player(), &pid("p1"));
    }

    #[test]
    fn explicit_order_with_unknown_player_is_rejected() {
        let mut game = created(&[("p1", "Alice")]);
        game.player_order = Some(vec![pid("ghost")]);

        assert_eq!(
            Session::from_created(&game),
            Err(SessionError::UnknownPlayer {
                player_id: pid("ghost")
            })
        );
    }

    #[test]
    fn game_without_players_is_rejected() {
        let err = Session::from_created(&created(&[])).unwrap_err();
        assert!(matches!(err, SessionError::NoPlayers { .. }));
        assert_eq!(err.to_string(), "game g1 was created without players");
    }

    #[test]
    fn same_response_same_session() {
        let game = created(&[("p1", "Alice"), ("p2", "Bob")]);
        assert_eq!(
            Session::from_created(&game).unwrap(),
            Session::from_created(&game).unwrap()
        );
    }
}
