//! JSON bodies exchanged with the game service.
//!
//! | Operation     | Method & path                  | Request         | Response            |
//! |---------------|--------------------------------|-----------------|---------------------|
//! | Create game   | `POST /api/games`              | none            | [`GameSnapshot`]    |
//! | Next question | `GET /api/games/{id}/question` | none            | [`QuestionResponse`]|
//! | Submit answer | `POST /api/games/{id}/answer`  | [`AnswerRequest`] | [`AnswerResult`]  |
//! | Game state    | `GET /api/games/{id}`          | none            | [`GameSnapshot`]    |
//!
//! Failures use a non-2xx status with an [`ApiErrorBody`].

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::{ErrorKind, GameId, PlayerId};

/// Result label the server uses for a correct answer.
pub const CORRECT_RESULT: &str = "Correct";

/// Lifecycle status of a game. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Created but not started.
    #[default]
    Waiting,
    /// Questions are being served.
    InProgress,
    /// No more questions; scores are final.
    Finished,
}

impl GameStatus {
    /// True once the game has finished.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Waiting => "waiting",
            Self::InProgress => "inprogress",
            Self::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// A participant and their current score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Player identifier (key of the `players` object on the wire).
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Points earned so far.
    pub score: u32,
}

impl Player {
    /// Create a player entry.
    pub fn new(id: PlayerId, name: impl Into<String>, score: u32) -> Self {
        Self {
            id,
            name: name.into(),
            score,
        }
    }
}

#[derive(Deserialize)]
struct PlayerFields {
    name: String,
    #[serde(default)]
    score: u32,
}

#[derive(Serialize)]
struct PlayerFieldsRef<'a> {
    name: &'a str,
    score: u32,
}

/// Players of a game in the order the server listed them.
///
/// On the wire this is a JSON object keyed by player id. Decoding keeps the
/// document order of the keys, which is the order used for display and for
/// picking the controlled player. A repeated key keeps its first position
/// and takes the last value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from players in display order.
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        players.into_iter().collect()
    }

    /// Insert a player, replacing an existing entry with the same id in place.
    pub fn upsert(&mut self, player: Player) {
        match self.players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player,
            None => self.players.push(player),
        }
    }

    /// Iterate players in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when the game has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Look up a player by id.
    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// True if the id belongs to a player of this roster.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// The first player in document order.
    pub fn first(&self) -> Option<&Player> {
        self.players.first()
    }

    /// All player ids in display order.
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut roster = Roster::default();
        for player in iter {
            roster.upsert(player);
        }
        roster
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.players.len()))?;
        for player in &self.players {
            map.serialize_entry(
                &player.id,
                &PlayerFieldsRef {
                    name: &player.name,
                    score: player.score,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RosterVisitor)
    }
}

struct RosterVisitor;

impl<'de> Visitor<'de> for RosterVisitor {
    type Value = Roster;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping player ids to {name, score}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Roster, A::Error> {
        let mut roster = Roster::default();
        while let Some((id, fields)) = access.next_entry::<PlayerId, PlayerFields>()? {
            roster.upsert(Player {
                id,
                name: fields.name,
                score: fields.score,
            });
        }
        Ok(roster)
    }
}

/// Full game state, as returned by create and by the state endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Game identifier.
    pub id: GameId,
    /// Current lifecycle status.
    #[serde(default)]
    pub status: GameStatus,
    /// Players keyed by id, in server order.
    pub players: Roster,
    /// Index of the question currently being asked, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_question_index: Option<u32>,
    /// Explicit player ordering, when the server provides one.
    ///
    /// Takes precedence over the key order of `players` when choosing the
    /// controlled player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_order: Option<Vec<PlayerId>>,
}

/// A question as served to players (the answer is never included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Zero-based position in the game's question sequence.
    pub index: u32,
    /// Question text.
    pub text: String,
    /// Server-side question id, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Body returned instead of a question once the sequence is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustedNotice {
    /// Human-readable notice, e.g. "No more questions".
    pub message: String,
}

/// Response of the next-question endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionResponse {
    /// No further question; a `message` field is present instead.
    Exhausted(ExhaustedNotice),
    /// The current question.
    Question(Question),
}

/// Answer submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    /// The player answering.
    pub player_id: PlayerId,
    /// Free-text answer.
    pub answer: String,
}

/// Outcome of an answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    /// Outcome label; [`CORRECT_RESULT`] when the answer was right.
    pub result: String,
    /// The expected answer, revealed after submission.
    pub correct_answer: String,
    /// Game status as of the submission.
    pub game_status: GameStatus,
    /// Submitting player's score after the submission, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_score: Option<u32>,
}

impl AnswerResult {
    /// True when the server judged the answer correct.
    pub fn is_correct(&self) -> bool {
        self.result == CORRECT_RESULT
    }
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable code, when the server sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiErrorBody {
    /// Body with only a message.
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            code: None,
        }
    }

    /// Attach a structured code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Structured kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::classify(self.code.as_deref(), self.error.as_deref().unwrap_or_default())
    }
}
