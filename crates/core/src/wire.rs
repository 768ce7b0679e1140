use crate::{CardValue, RoundSnapshot, SpecialInventory};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    StartRound,
    Draw,
    Stand,
    AdvanceOpponent,
    UseSpecial(String),
    ResetSession,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StartRound => "start round",
            Self::Draw => "draw",
            Self::Stand => "stand",
            Self::AdvanceOpponent => "opponent turn",
            Self::UseSpecial(_) => "use special card",
            Self::ResetSession => "reset session",
        }
    }

    /// Draw and stand hand the turn to the opponent when the round goes on.
    pub fn passes_turn(&self) -> bool {
        matches!(self, Self::Draw | Self::Stand)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseSpecial(id) => write!(f, "use special card {id}"),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("engine unreachable: {0}")]
    Unreachable(String),
    #[error("engine returned status {status}: {}", .message.as_deref().unwrap_or("no detail"))]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("undecodable engine response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("missing field `{0}`")]
    Missing(&'static str),
    #[error("engine reported: {0}")]
    Rejected(String),
}

/// Engine response body. Every field is optional on the wire; which ones
/// must be present depends on the command that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundPayload {
    #[serde(default)]
    pub player_hand: Option<Vec<CardValue>>,
    #[serde(default, rename = "ai_hand")]
    pub opponent_hand: Option<Vec<CardValue>>,
    #[serde(default)]
    pub player_points: Option<i64>,
    #[serde(default, rename = "ai_points")]
    pub opponent_points: Option<i64>,
    #[serde(default, rename = "player_sp_cards")]
    pub player_specials: Option<SpecialInventory>,
    #[serde(default, rename = "ai_sp_cards")]
    pub opponent_specials: Option<SpecialInventory>,
    #[serde(default, rename = "declared_sp_card")]
    pub player_declared: Option<String>,
    #[serde(default, rename = "ai_declared_sp_card")]
    pub opponent_declared: Option<String>,
    #[serde(default, rename = "game_over")]
    pub round_over: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub load_status: Option<String>,
    #[serde(default)]
    pub hands_changed: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub snapshot: RoundSnapshot,
    pub load_status: Option<String>,
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, PayloadError> {
    value.ok_or(PayloadError::Missing(field))
}

impl RoundPayload {
    /// Checks the fields `command` promises and builds the replacement
    /// snapshot. `previous` only supplies hands a special card left alone.
    pub fn into_snapshot(
        self,
        command: &Command,
        previous: &RoundSnapshot,
    ) -> Result<Accepted, PayloadError> {
        if let Some(error) = self.error {
            return Err(PayloadError::Rejected(error));
        }
        let player_points = require(self.player_points, "player_points")?;
        let opponent_points = require(self.opponent_points, "ai_points")?;
        let player_specials = require(self.player_specials, "player_sp_cards")?;
        let opponent_specials = require(self.opponent_specials, "ai_sp_cards")?;
        let message = require(self.message, "message")?;

        let (player_hand, opponent_hand, round_over) = match command {
            Command::StartRound => (
                require(self.player_hand, "player_hand")?,
                require(self.opponent_hand, "ai_hand")?,
                self.round_over.unwrap_or(false),
            ),
            Command::Draw | Command::Stand | Command::AdvanceOpponent => (
                require(self.player_hand, "player_hand")?,
                require(self.opponent_hand, "ai_hand")?,
                require(self.round_over, "game_over")?,
            ),
            Command::UseSpecial(_) => {
                let (player_hand, opponent_hand) = if self.hands_changed.unwrap_or(false) {
                    (
                        require(self.player_hand, "player_hand")?,
                        require(self.opponent_hand, "ai_hand")?,
                    )
                } else {
                    (previous.player_hand.clone(), previous.opponent_hand.clone())
                };
                (
                    player_hand,
                    opponent_hand,
                    self.round_over.unwrap_or(previous.round_over),
                )
            }
            Command::ResetSession => return Err(PayloadError::Missing("round state")),
        };

        Ok(Accepted {
            snapshot: RoundSnapshot {
                player_points: Some(player_points),
                opponent_points: Some(opponent_points),
                player_hand,
                opponent_hand,
                player_specials,
                opponent_specials,
                player_declared: self.player_declared,
                opponent_declared: self.opponent_declared,
                round_over,
                message,
            },
            load_status: self.load_status.filter(|note| !note.is_empty()),
        })
    }

    pub fn into_reset_message(self) -> Result<String, PayloadError> {
        if let Some(error) = self.error {
            return Err(PayloadError::Rejected(error));
        }
        require(self.message, "message")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UseSpecialRequest {
    pub card_id: String,
}
