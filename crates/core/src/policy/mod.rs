//! Role-based authorization decisions.
//!
//! Pure decision functions gating every mutating or sensitive read
//! operation. No I/O: callers fetch whatever state a rule needs (such
//! as the fresh `can_download` flag) and pass it in.
//!
//! # Modules
//!
//! - `role` - The `Role` enum and parsing
//! - `rules` - The priority-ordered decision table
//! - `error` - Policy-specific error types

pub mod error;
pub mod role;
pub mod rules;

pub use error::PolicyError;
pub use role::Role;
pub use rules::{
    TransactionScope, check_report_access, check_signup_role, check_toggle_active,
    check_user_create, check_user_delete, check_user_update, require_admin, transaction_scope,
};
