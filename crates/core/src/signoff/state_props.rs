//! Property-based tests for the sign-off state machine.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use crate::signoff::SignOff;

/// Strategy for generating random UUIDs.
fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Strategy for generating random timestamps in a sane range.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Strategy for a sequence of authorize/revoke decisions.
fn arb_decisions() -> impl Strategy<Value = Vec<(bool, Uuid, DateTime<Utc>)>> {
    prop::collection::vec((any::<bool>(), arb_uuid(), arb_timestamp()), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Authorizing twice leaves the flag set both times, with the
    /// latest actor and timestamp winning.
    #[test]
    fn prop_authorize_is_idempotent(
        first in arb_uuid(),
        second in arb_uuid(),
        at1 in arb_timestamp(),
        at2 in arb_timestamp(),
    ) {
        let once = SignOff::authorize(first, at1);
        prop_assert!(once.is_authorized());

        let twice = SignOff::authorize(second, at2);
        prop_assert!(twice.is_authorized());
        prop_assert_eq!(twice.authorized_by, Some(second));
        prop_assert_eq!(twice.authorized_at, Some(at2));
    }

    /// Revoking always lands in the unflagged state, whatever came before.
    #[test]
    fn prop_revoke_clears(admin in arb_uuid(), at in arb_timestamp()) {
        let _ = SignOff::authorize(admin, at);
        let revoked = SignOff::revoke();

        prop_assert!(!revoked.is_authorized());
        prop_assert_eq!(revoked, SignOff::unflagged());
    }

    /// Every reachable state satisfies the both-or-neither invariant.
    #[test]
    fn prop_transitions_preserve_consistency(decisions in arb_decisions()) {
        let mut state = SignOff::unflagged();
        prop_assert!(state.is_consistent());

        for (decision, admin, at) in decisions {
            state = SignOff::apply(decision, admin, at);
            prop_assert!(state.is_consistent());
            prop_assert_eq!(state.is_authorized(), decision);
        }
    }
}
