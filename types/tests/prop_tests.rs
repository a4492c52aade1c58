use proptest::prelude::*;

use civic_types::{AccountId, BlockHeight, GovernableParam, GovernanceAction, Role, StakeAmount};

fn arb_param() -> impl Strategy<Value = GovernableParam> {
    prop::sample::select(GovernableParam::ALL.to_vec())
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Governance), Just(Role::ReserveManager)]
}

fn arb_leaf_action() -> impl Strategy<Value = GovernanceAction> {
    prop_oneof![
        (arb_param(), any::<u128>())
            .prop_map(|(param, value)| GovernanceAction::SetParameter { param, value }),
        ("[a-z]{1,12}", arb_role()).prop_map(|(name, role)| GovernanceAction::GrantRole {
            account: AccountId::new(name),
            role,
        }),
        ("[a-z]{1,12}", arb_role()).prop_map(|(name, role)| GovernanceAction::RevokeRole {
            account: AccountId::new(name),
            role,
        }),
    ]
}

proptest! {
    /// BlockHeight ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn block_height_ordering(a in any::<u64>(), b in any::<u64>()) {
        let ha = BlockHeight::new(a);
        let hb = BlockHeight::new(b);
        prop_assert_eq!(ha <= hb, a <= b);
        prop_assert_eq!(ha == hb, a == b);
    }

    /// saturating_add agrees with checked_add whenever the sum fits.
    #[test]
    fn block_saturating_add_matches_checked(start in any::<u64>(), blocks in any::<u64>()) {
        let height = BlockHeight::new(start);
        match height.checked_add(blocks) {
            Some(sum) => prop_assert_eq!(height.saturating_add(blocks), sum),
            None => prop_assert_eq!(height.saturating_add(blocks), BlockHeight::new(u64::MAX)),
        }
    }

    /// checked_add on stake never wraps.
    #[test]
    fn stake_checked_add_never_wraps(a in any::<u128>(), b in any::<u128>()) {
        let sum = StakeAmount::new(a).checked_add(StakeAmount::new(b));
        match a.checked_add(b) {
            Some(expected) => prop_assert_eq!(sum, Some(StakeAmount::new(expected))),
            None => prop_assert_eq!(sum, None),
        }
    }

    /// Every encodable action decodes back to itself, batches included.
    #[test]
    fn action_payload_is_lossless(leaves in prop::collection::vec(arb_leaf_action(), 0..6)) {
        let action = GovernanceAction::Batch(leaves.clone());
        prop_assert_eq!(action.leaf_count(), leaves.len());
        let bytes = action.encode().unwrap();
        prop_assert_eq!(GovernanceAction::decode(&bytes).unwrap(), action);
    }
}
