use proptest::prelude::*;
use sp21_core::{
    compute_permissions, Catalog, RecoveryCache, RoundSnapshot, SpecialInventory, TurnContext,
    MINUS_THREE_ID,
};

fn arb_declared() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(MINUS_THREE_ID.to_string())),
        Just(Some("sp_unreleased".to_string())),
    ]
}

fn arb_inventory() -> impl Strategy<Value = SpecialInventory> {
    (0u32..3, 0u32..2).prop_map(|(minus, unknown)| {
        SpecialInventory::new()
            .with_card(MINUS_THREE_ID, minus)
            .with_card("sp_unreleased", unknown)
    })
}

fn arb_points() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), (-5i64..30).prop_map(Some)]
}

fn arb_snapshot() -> impl Strategy<Value = RoundSnapshot> {
    (
        arb_points(),
        arb_points(),
        arb_inventory(),
        arb_inventory(),
        arb_declared(),
        arb_declared(),
        any::<bool>(),
    )
        .prop_map(
            |(player, opponent, mine, theirs, my_slot, their_slot, round_over)| RoundSnapshot {
                player_points: player,
                opponent_points: opponent,
                player_hand: vec![4, 7],
                opponent_hand: vec![0, 3],
                player_specials: mine,
                opponent_specials: theirs,
                player_declared: my_slot,
                opponent_declared: their_slot,
                round_over,
                message: String::new(),
            },
        )
}

/// The same table seen from the opponent's chair.
fn mirrored(snap: &RoundSnapshot) -> RoundSnapshot {
    RoundSnapshot {
        player_points: snap.opponent_points,
        opponent_points: snap.player_points,
        player_hand: snap.opponent_hand.clone(),
        opponent_hand: snap.player_hand.clone(),
        player_specials: snap.opponent_specials.clone(),
        opponent_specials: snap.player_specials.clone(),
        player_declared: snap.opponent_declared.clone(),
        opponent_declared: snap.player_declared.clone(),
        round_over: snap.round_over,
        message: snap.message.clone(),
    }
}

proptest! {
    /// Whichever side holds the turn, at most one of the two could open a declaration.
    #[test]
    fn declare_is_never_open_for_both_sides(snap in arb_snapshot(), local in any::<bool>()) {
        let catalog = Catalog::builtin();
        let (mine, theirs) = if local {
            (TurnContext::local(false), TurnContext::waiting(false))
        } else {
            (TurnContext::waiting(false), TurnContext::local(false))
        };
        let ours = compute_permissions(&snap, mine, &catalog);
        let flipped = compute_permissions(&mirrored(&snap), theirs, &catalog);
        prop_assert!(!(ours.can_use(MINUS_THREE_ID) && flipped.can_use(MINUS_THREE_ID)));
    }

    #[test]
    fn declare_requires_both_slots_free_of_known_declarations(snap in arb_snapshot()) {
        let perms = compute_permissions(&snap, TurnContext::local(false), &Catalog::builtin());
        if perms.can_use(MINUS_THREE_ID) {
            prop_assert!(snap.player_declared.is_none());
            prop_assert_ne!(snap.opponent_declared.as_deref(), Some(MINUS_THREE_ID));
            prop_assert!(!snap.round_over);
        }
    }

    #[test]
    fn continue_is_off_once_the_session_is_over(snap in arb_snapshot(), local in any::<bool>()) {
        let turn = TurnContext { local_turn: local, session_over: true };
        let perms = compute_permissions(&snap, turn, &Catalog::builtin());
        prop_assert!(!perms.next_round);
    }

    #[test]
    fn continue_implies_both_sides_positive(snap in arb_snapshot()) {
        let perms = compute_permissions(&snap, TurnContext::local(false), &Catalog::builtin());
        if perms.next_round {
            prop_assert!(snap.round_over);
            prop_assert!(snap.both_sides_positive());
        }
    }

    #[test]
    fn nothing_is_enabled_while_waiting(snap in arb_snapshot()) {
        let mut live = snap;
        live.round_over = false;
        let perms = compute_permissions(&live, TurnContext::waiting(false), &Catalog::builtin());
        prop_assert!(!perms.any_enabled());
    }

    /// A failed command leaves special-card eligibility exactly as the last confirmed state had it.
    #[test]
    fn restoring_the_cache_reproduces_confirmed_permissions(
        confirmed in arb_snapshot(),
        garbage in arb_snapshot(),
    ) {
        let catalog = Catalog::builtin();
        let cache = RecoveryCache::seeded_from(&confirmed);
        let mut base = garbage;
        base.round_over = confirmed.round_over;
        let restored = cache.restore_onto(&base);
        let turn = TurnContext::local(false);
        let expected = compute_permissions(&confirmed, turn, &catalog);
        let actual = compute_permissions(&restored, turn, &catalog);
        prop_assert_eq!(actual.specials, expected.specials);
        prop_assert_eq!(actual.unknown, expected.unknown);
    }
}
