use crate::{RoundSnapshot, SpecialInventory};
use serde::{Deserialize, Serialize};

/// Special-card fragment of the last snapshot the engine confirmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecoveryCache {
    pub player_specials: SpecialInventory,
    pub opponent_specials: SpecialInventory,
    pub player_declared: Option<String>,
    pub opponent_declared: Option<String>,
}

impl RecoveryCache {
    pub fn seeded_from(snapshot: &RoundSnapshot) -> Self {
        Self {
            player_specials: snapshot.player_specials.clone(),
            opponent_specials: snapshot.opponent_specials.clone(),
            player_declared: snapshot.player_declared.clone(),
            opponent_declared: snapshot.opponent_declared.clone(),
        }
    }

    pub fn refresh(&mut self, snapshot: &RoundSnapshot) {
        *self = Self::seeded_from(snapshot);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `base` with its special-card fields taken from the cache.
    pub fn restore_onto(&self, base: &RoundSnapshot) -> RoundSnapshot {
        RoundSnapshot {
            player_specials: self.player_specials.clone(),
            opponent_specials: self.opponent_specials.clone(),
            player_declared: self.player_declared.clone(),
            opponent_declared: self.opponent_declared.clone(),
            ..base.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_keeps_hands_and_points_from_base() {
        let confirmed = RoundSnapshot {
            player_specials: SpecialInventory::new().with_card("a", 1),
            player_points: Some(10),
            ..RoundSnapshot::default()
        };
        let cache = RecoveryCache::seeded_from(&confirmed);

        let partial = RoundSnapshot {
            player_specials: SpecialInventory::new().with_card("a", 0),
            player_declared: Some("a".to_string()),
            player_points: Some(7),
            player_hand: vec![5],
            ..RoundSnapshot::default()
        };
        let restored = cache.restore_onto(&partial);
        assert_eq!(restored.player_specials.count("a"), 1);
        assert_eq!(restored.player_declared, None);
        assert_eq!(restored.player_points, Some(7));
        assert_eq!(restored.player_hand, vec![5]);
    }

    #[test]
    fn clear_returns_to_default() {
        let mut cache = RecoveryCache {
            player_declared: Some("a".to_string()),
            ..RecoveryCache::default()
        };
        cache.clear();
        assert_eq!(cache, RecoveryCache::default());
    }
}
