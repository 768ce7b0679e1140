use serde::{Deserialize, Serialize};

/// Face value reported by the engine for a hand card.
pub type CardValue = u32;

/// Opponent cards the engine has not revealed yet arrive as this value.
pub const HIDDEN_CARD: CardValue = 0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardSlot {
    Face(CardValue),
    Back,
}

impl CardSlot {
    pub fn player(value: CardValue) -> Self {
        Self::Face(value)
    }

    pub fn opponent(value: CardValue) -> Self {
        if value == HIDDEN_CARD {
            Self::Back
        } else {
            Self::Face(value)
        }
    }

    pub fn is_hidden(self) -> bool {
        matches!(self, Self::Back)
    }

    pub fn label(self) -> String {
        match self {
            Self::Face(value) => value.to_string(),
            Self::Back => "??".to_string(),
        }
    }
}
