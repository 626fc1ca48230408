//! Progress tracking for a running game.
//!
//! Question indices and scores only ever move forward on a well-behaved
//! server. The tracker records the highest values seen and reports
//! [`Anomaly`]s when the server contradicts itself. Anomalies are
//! diagnostics only: the client still shows what the server sent.

use std::collections::HashMap;
use std::fmt;
use zimble_quiz_types::{PlayerId, Roster};

/// A server observation that went backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// A question index lower than one already shown.
    QuestionRegressed {
        /// Highest index shown so far.
        previous: u32,
        /// Index just served.
        current: u32,
    },
    /// A player's score decreased.
    ScoreRegressed {
        /// The player whose score dropped.
        player: PlayerId,
        /// Highest score seen so far.
        previous: u32,
        /// Score just observed.
        current: u32,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuestionRegressed { previous, current } => write!(
                f,
                "question index went back from {} to {}",
                previous, current
            ),
            Self::ScoreRegressed {
                player,
                previous,
                current,
            } => write!(
                f,
                "score of player {} went back from {} to {}",
                player, previous, current
            ),
        }
    }
}

/// Tracks the highest question index and per-player scores of one game.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    last_index: Option<u32>,
    scores: HashMap<PlayerId, u32>,
}

impl ProgressTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the question at `index` was shown.
    ///
    /// Serving the same index again is allowed (the same question can be
    /// fetched twice); a lower index is reported.
    pub fn question_shown(&mut self, index: u32) -> Result<(), Anomaly> {
        match self.last_index {
            Some(previous) if index < previous => Err(Anomaly::QuestionRegressed {
                previous,
                current: index,
            }),
            _ => {
                self.last_index = Some(index);
                Ok(())
            }
        }
    }

    /// Record the scores of a roster and report any that went down.
    pub fn scores_observed(&mut self, roster: &Roster) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();
        for player in roster {
            match self.scores.get(&player.id).copied() {
                Some(previous) if player.score < previous => {
                    anomalies.push(Anomaly::ScoreRegressed {
                        player: player.id.clone(),
                        previous,
                        current: player.score,
                    });
                }
                _ => {
                    self.scores.insert(player.id.clone(), player.score);
                }
            }
        }
        anomalies
    }

    /// Highest question index shown so far.
    pub fn last_index(&self) -> Option<u32> {
        self.last_index
    }

    /// Highest score seen for a player.
    pub fn score(&self, player: &PlayerId) -> Option<u32> {
        self.scores.get(player).copied()
    }

    /// Forget everything, e.g. when a new game starts.
    pub fn reset(&mut self) {
        self.last_index = None;
        self.scores.clear();
    }
}
