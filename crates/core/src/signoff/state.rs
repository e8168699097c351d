//! Sign-off state and transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-off state of a transaction.
///
/// Invariant: `authorized_by` and `authorized_at` are both set or both
/// null, and set only together with `requires_auth = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOff {
    /// Whether an admin has flagged the transaction as authorized.
    pub requires_auth: bool,
    /// The admin who signed off.
    pub authorized_by: Option<Uuid>,
    /// When the sign-off happened.
    pub authorized_at: Option<DateTime<Utc>>,
}

impl SignOff {
    /// The initial, unflagged state.
    #[must_use]
    pub const fn unflagged() -> Self {
        Self {
            requires_auth: false,
            authorized_by: None,
            authorized_at: None,
        }
    }

    /// Signs the transaction off.
    ///
    /// Idempotent: re-authorizing replaces the actor and timestamp.
    #[must_use]
    pub const fn authorize(admin_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            requires_auth: true,
            authorized_by: Some(admin_id),
            authorized_at: Some(at),
        }
    }

    /// Clears the sign-off.
    #[must_use]
    pub const fn revoke() -> Self {
        Self::unflagged()
    }

    /// Applies an authorize/revoke decision.
    #[must_use]
    pub const fn apply(decision: bool, admin_id: Uuid, at: DateTime<Utc>) -> Self {
        if decision {
            Self::authorize(admin_id, at)
        } else {
            Self::revoke()
        }
    }

    /// Returns true when the transaction carries a sign-off.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.requires_auth
    }

    /// Checks the both-or-neither invariant.
    ///
    /// The only valid states are the unflagged state and a full
    /// sign-off with actor and timestamp present.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        match (self.requires_auth, self.authorized_by, self.authorized_at) {
            (false, None, None) => true,
            (true, Some(_), Some(_)) => true,
            _ => false,
        }
    }
}

impl Default for SignOff {
    fn default() -> Self {
        Self::unflagged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unflagged_is_consistent() {
        let state = SignOff::unflagged();
        assert!(!state.is_authorized());
        assert!(state.is_consistent());
        assert_eq!(state.authorized_by, None);
        assert_eq!(state.authorized_at, None);
    }

    #[test]
    fn test_authorize_sets_all_fields() {
        let admin_id = Uuid::new_v4();
        let at = Utc::now();

        let state = SignOff::authorize(admin_id, at);

        assert!(state.is_authorized());
        assert!(state.is_consistent());
        assert_eq!(state.authorized_by, Some(admin_id));
        assert_eq!(state.authorized_at, Some(at));
    }

    #[test]
    fn test_authorize_twice_keeps_latest_actor() {
        let first_admin = Uuid::new_v4();
        let second_admin = Uuid::new_v4();
        let first_at = Utc::now();
        let second_at = first_at + chrono::Duration::minutes(5);

        let state = SignOff::authorize(first_admin, first_at);
        assert!(state.is_authorized());

        let state = SignOff::authorize(second_admin, second_at);
        assert!(state.is_authorized());
        assert_eq!(state.authorized_by, Some(second_admin));
        assert_eq!(state.authorized_at, Some(second_at));
    }

    #[test]
    fn test_revoke_clears_all_fields() {
        let state = SignOff::authorize(Uuid::new_v4(), Utc::now());
        assert!(state.is_authorized());

        let state = SignOff::revoke();
        assert!(!state.is_authorized());
        assert_eq!(state.authorized_by, None);
        assert_eq!(state.authorized_at, None);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_apply_maps_decision() {
        let admin_id = Uuid::new_v4();
        let at = Utc::now();

        assert_eq!(
            SignOff::apply(true, admin_id, at),
            SignOff::authorize(admin_id, at)
        );
        assert_eq!(SignOff::apply(false, admin_id, at), SignOff::revoke());
    }

    #[test]
    fn test_partial_states_are_inconsistent() {
        let broken = SignOff {
            requires_auth: true,
            authorized_by: None,
            authorized_at: None,
        };
        assert!(!broken.is_consistent());

        let broken = SignOff {
            requires_auth: false,
            authorized_by: Some(Uuid::new_v4()),
            authorized_at: None,
        };
        assert!(!broken.is_consistent());

        let broken = SignOff {
            requires_auth: true,
            authorized_by: Some(Uuid::new_v4()),
            authorized_at: None,
        };
        assert!(!broken.is_consistent());
    }
}
