use crate::{CardClass, Catalog, RoundSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnContext {
    pub local_turn: bool,
    /// Sticky: set the first time either side drops to zero points.
    pub session_over: bool,
}

impl TurnContext {
    pub fn local(session_over: bool) -> Self {
        Self {
            local_turn: true,
            session_over,
        }
    }

    pub fn waiting(session_over: bool) -> Self {
        Self {
            local_turn: false,
            session_over,
        }
    }
}

/// Which controls may be clicked right now. Always rebuilt from a snapshot,
/// never edited in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiPermissionSet {
    pub draw: bool,
    pub stand: bool,
    pub next_round: bool,
    pub specials: BTreeMap<String, bool>,
    /// Held ids with no catalog entry; never actionable.
    pub unknown: Vec<String>,
}

impl UiPermissionSet {
    /// Everything off; shown while a command is in flight.
    pub fn locked() -> Self {
        Self::default()
    }

    pub fn can_use(&self, id: &str) -> bool {
        self.specials.get(id).copied().unwrap_or(false)
    }

    pub fn any_enabled(&self) -> bool {
        self.draw || self.stand || self.next_round || self.specials.values().any(|on| *on)
    }
}

pub fn compute_permissions(
    snapshot: &RoundSnapshot,
    turn: TurnContext,
    catalog: &Catalog,
) -> UiPermissionSet {
    let live = turn.local_turn && !snapshot.round_over;
    let opponent_blocks = snapshot
        .opponent_declared
        .as_deref()
        .map(|id| catalog.is_declare(id))
        .unwrap_or(false);
    let declare_open = live && snapshot.player_declared.is_none() && !opponent_blocks;

    let mut specials = BTreeMap::new();
    let mut unknown = Vec::new();
    for (id, _count) in snapshot.player_specials.held() {
        match catalog.class_of(id) {
            Some(CardClass::Instant) => {
                specials.insert(id.to_string(), live);
            }
            Some(CardClass::Declare) => {
                specials.insert(id.to_string(), declare_open);
            }
            None => unknown.push(id.to_string()),
        }
    }

    UiPermissionSet {
        draw: live,
        stand: live,
        next_round: snapshot.round_over && !turn.session_over && snapshot.both_sides_positive(),
        specials,
        unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SpecialCardDef, SpecialInventory};

    fn catalog() -> Catalog {
        Catalog::from_defs(vec![
            SpecialCardDef {
                id: "hold".to_string(),
                name: "Hold".to_string(),
                narration: String::new(),
                class: CardClass::Declare,
            },
            SpecialCardDef {
                id: "peek".to_string(),
                name: "Peek".to_string(),
                narration: String::new(),
                class: CardClass::Instant,
            },
        ])
        .expect("catalog")
    }

    fn live_snapshot() -> RoundSnapshot {
        RoundSnapshot {
            player_points: Some(10),
            opponent_points: Some(10),
            player_hand: vec![4, 9],
            opponent_hand: vec![0, 2],
            player_specials: SpecialInventory::new()
                .with_card("hold", 1)
                .with_card("peek", 2),
            ..RoundSnapshot::default()
        }
    }

    #[test]
    fn local_turn_enables_everything_held() {
        let perms = compute_permissions(&live_snapshot(), TurnContext::local(false), &catalog());
        assert!(perms.draw && perms.stand);
        assert!(perms.can_use("hold"));
        assert!(perms.can_use("peek"));
        assert!(!perms.next_round);
    }

    #[test]
    fn opponent_turn_disables_everything() {
        let perms = compute_permissions(&live_snapshot(), TurnContext::waiting(false), &catalog());
        assert!(!perms.any_enabled());
    }

    #[test]
    fn own_declaration_blocks_declare_but_not_instant() {
        let mut snap = live_snapshot();
        snap.player_declared = Some("hold".to_string());
        let perms = compute_permissions(&snap, TurnContext::local(false), &catalog());
        assert!(!perms.can_use("hold"));
        assert!(perms.can_use("peek"));
    }

    #[test]
    fn opponent_instant_in_slot_does_not_block() {
        let mut snap = live_snapshot();
        snap.opponent_declared = Some("peek".to_string());
        let perms = compute_permissions(&snap, TurnContext::local(false), &catalog());
        assert!(perms.can_use("hold"));
    }

    #[test]
    fn unknown_held_card_is_reported_not_enabled() {
        let mut snap = live_snapshot();
        snap.player_specials = snap.player_specials.with_card("sp_new", 1);
        let perms = compute_permissions(&snap, TurnContext::local(false), &catalog());
        assert_eq!(perms.unknown, vec!["sp_new".to_string()]);
        assert!(!perms.can_use("sp_new"));
        assert!(perms.draw);
    }

    #[test]
    fn zero_count_cards_get_no_entry() {
        let mut snap = live_snapshot();
        snap.player_specials = SpecialInventory::new().with_card("hold", 0);
        let perms = compute_permissions(&snap, TurnContext::local(false), &catalog());
        assert!(perms.specials.is_empty());
    }

    #[test]
    fn locked_set_has_nothing_enabled() {
        assert!(!UiPermissionSet::locked().any_enabled());
    }
}
