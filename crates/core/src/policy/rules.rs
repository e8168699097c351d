//! The priority-ordered authorization decision table.
//!
//! Rules, in evaluation order:
//!
//! 1. Missing/invalid token is rejected by the auth middleware before
//!    any handler runs.
//! 2. Admin-only actions (user management, transaction mutation,
//!    sign-off toggling, backups, admin stats) reject non-admins.
//! 3. Report download requires admin role or a fresh `can_download`
//!    flag fetched from storage, never from the token.
//! 4. Transaction reads are scoped: admins see all rows, viewers only
//!    their own. Applied at the query layer via [`TransactionScope`].
//! 5. An admin may not deactivate their own account.
//! 6. Admin accounts are immutable via the update/delete endpoints.

use uuid::Uuid;

use crate::policy::error::PolicyError;
use crate::policy::role::Role;

/// Row visibility for transaction queries.
///
/// Computed from the caller's role and applied inside the repository
/// predicate before any user-supplied filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionScope {
    /// No owner filter (admin).
    All,
    /// Only rows owned by the given user (viewer).
    OwnedBy(Uuid),
}

impl TransactionScope {
    /// Returns the owner filter, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<Uuid> {
        match self {
            Self::All => None,
            Self::OwnedBy(user_id) => Some(*user_id),
        }
    }
}

/// Computes the transaction visibility scope for a caller.
#[must_use]
pub const fn transaction_scope(role: Role, user_id: Uuid) -> TransactionScope {
    match role {
        Role::Admin => TransactionScope::All,
        Role::Viewer => TransactionScope::OwnedBy(user_id),
    }
}

/// Gate for admin-only actions.
///
/// # Errors
///
/// Returns `PolicyError::AdminRequired` for non-admin callers.
pub const fn require_admin(role: Role) -> Result<(), PolicyError> {
    match role {
        Role::Admin => Ok(()),
        Role::Viewer => Err(PolicyError::AdminRequired),
    }
}

/// Gate for report downloads.
///
/// `can_download` must be the stored flag fetched at request time; the
/// flag can change after token issuance.
///
/// # Errors
///
/// Returns `PolicyError::DownloadNotAllowed` when neither the role nor
/// the flag grants access.
pub const fn check_report_access(role: Role, can_download: bool) -> Result<(), PolicyError> {
    if role.is_admin() || can_download {
        Ok(())
    } else {
        Err(PolicyError::DownloadNotAllowed)
    }
}

/// Gate for user updates.
///
/// Admin accounts are never mutated through the edit path, and no
/// account is promoted to admin through it.
///
/// # Errors
///
/// Returns `PolicyError::AdminImmutable` when the target holds the
/// admin role or the admin role is requested.
pub fn check_user_update(
    target_role: Role,
    requested_role: Option<Role>,
) -> Result<(), PolicyError> {
    if target_role.is_admin() || requested_role.is_some_and(|r| r.is_admin()) {
        return Err(PolicyError::AdminImmutable);
    }
    Ok(())
}

/// Gate for user deletion.
///
/// # Errors
///
/// Returns `PolicyError::AdminImmutable` when the target holds the
/// admin role.
pub const fn check_user_delete(target_role: Role) -> Result<(), PolicyError> {
    if target_role.is_admin() {
        return Err(PolicyError::AdminImmutable);
    }
    Ok(())
}

/// Gate for admin-panel user creation.
///
/// New accounts are created as viewers; the admin role is never granted
/// through this path.
///
/// # Errors
///
/// Returns `PolicyError::AdminImmutable` when the admin role is
/// requested.
pub fn check_user_create(requested_role: Option<Role>) -> Result<(), PolicyError> {
    if requested_role.is_some_and(|r| r.is_admin()) {
        return Err(PolicyError::AdminImmutable);
    }
    Ok(())
}

/// Gate for the activate/deactivate toggle.
///
/// # Errors
///
/// Returns `PolicyError::SelfDeactivation` when an account tries to
/// deactivate itself.
pub fn check_toggle_active(
    actor_id: Uuid,
    target_id: Uuid,
    is_active: bool,
) -> Result<(), PolicyError> {
    if actor_id == target_id && !is_active {
        return Err(PolicyError::SelfDeactivation);
    }
    Ok(())
}

/// Gate for self-service signup.
///
/// Signup always produces a viewer; requesting the admin role is
/// rejected outright.
///
/// # Errors
///
/// Returns `PolicyError::AdminSignupRejected` when the admin role is
/// requested.
pub fn check_signup_role(requested_role: Option<Role>) -> Result<(), PolicyError> {
    if requested_role.is_some_and(|r| r.is_admin()) {
        return Err(PolicyError::AdminSignupRejected);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_scope_admin_sees_all() {
        let user_id = Uuid::new_v4();
        assert_eq!(
            transaction_scope(Role::Admin, user_id),
            TransactionScope::All
        );
        assert_eq!(transaction_scope(Role::Admin, user_id).owner(), None);
    }

    #[test]
    fn test_transaction_scope_viewer_owns_rows() {
        let user_id = Uuid::new_v4();
        let scope = transaction_scope(Role::Viewer, user_id);
        assert_eq!(scope, TransactionScope::OwnedBy(user_id));
        assert_eq!(scope.owner(), Some(user_id));
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(Role::Admin).is_ok());
        assert_eq!(
            require_admin(Role::Viewer),
            Err(PolicyError::AdminRequired)
        );
    }

    #[test]
    fn test_report_access() {
        assert!(check_report_access(Role::Admin, false).is_ok());
        assert!(check_report_access(Role::Admin, true).is_ok());
        assert!(check_report_access(Role::Viewer, true).is_ok());
        assert_eq!(
            check_report_access(Role::Viewer, false),
            Err(PolicyError::DownloadNotAllowed)
        );
    }

    #[test]
    fn test_user_update_admin_target_rejected() {
        assert_eq!(
            check_user_update(Role::Admin, None),
            Err(PolicyError::AdminImmutable)
        );
        assert_eq!(
            check_user_update(Role::Admin, Some(Role::Viewer)),
            Err(PolicyError::AdminImmutable)
        );
    }

    #[test]
    fn test_user_update_admin_promotion_rejected() {
        assert_eq!(
            check_user_update(Role::Viewer, Some(Role::Admin)),
            Err(PolicyError::AdminImmutable)
        );
    }

    #[test]
    fn test_user_update_viewer_allowed() {
        assert!(check_user_update(Role::Viewer, None).is_ok());
        assert!(check_user_update(Role::Viewer, Some(Role::Viewer)).is_ok());
    }

    #[test]
    fn test_user_create_admin_role_rejected() {
        assert!(check_user_create(None).is_ok());
        assert!(check_user_create(Some(Role::Viewer)).is_ok());
        assert_eq!(
            check_user_create(Some(Role::Admin)),
            Err(PolicyError::AdminImmutable)
        );
    }

    #[test]
    fn test_user_delete() {
        assert_eq!(
            check_user_delete(Role::Admin),
            Err(PolicyError::AdminImmutable)
        );
        assert!(check_user_delete(Role::Viewer).is_ok());
    }

    #[test]
    fn test_toggle_active_self_deactivation_rejected() {
        let id = Uuid::new_v4();
        assert_eq!(
            check_toggle_active(id, id, false),
            Err(PolicyError::SelfDeactivation)
        );
        // Re-activating yourself is allowed, as is toggling others.
        assert!(check_toggle_active(id, id, true).is_ok());
        assert!(check_toggle_active(id, Uuid::new_v4(), false).is_ok());
    }

    #[test]
    fn test_signup_role() {
        assert!(check_signup_role(None).is_ok());
        assert!(check_signup_role(Some(Role::Viewer)).is_ok());
        assert_eq!(
            check_signup_role(Some(Role::Admin)),
            Err(PolicyError::AdminSignupRejected)
        );
    }
}
