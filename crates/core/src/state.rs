use crate::{CardSlot, CardValue, SpecialInventory};
use serde::{Deserialize, Serialize};

/// Round state as last confirmed by the engine. Replaced wholesale on
/// every successful command; never patched locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub player_points: Option<i64>,
    pub opponent_points: Option<i64>,
    pub player_hand: Vec<CardValue>,
    pub opponent_hand: Vec<CardValue>,
    pub player_specials: SpecialInventory,
    pub opponent_specials: SpecialInventory,
    pub player_declared: Option<String>,
    pub opponent_declared: Option<String>,
    pub round_over: bool,
    pub message: String,
}

impl RoundSnapshot {
    pub fn player_slots(&self) -> Vec<CardSlot> {
        self.player_hand.iter().copied().map(CardSlot::player).collect()
    }

    pub fn opponent_slots(&self) -> Vec<CardSlot> {
        self.opponent_hand
            .iter()
            .copied()
            .map(CardSlot::opponent)
            .collect()
    }

    /// True once either side's known points are at or below zero.
    pub fn any_side_exhausted(&self) -> bool {
        [self.player_points, self.opponent_points]
            .into_iter()
            .flatten()
            .any(|points| points <= 0)
    }

    pub fn both_sides_positive(&self) -> bool {
        matches!(
            (self.player_points, self.opponent_points),
            (Some(player), Some(opponent)) if player > 0 && opponent > 0
        )
    }
}
