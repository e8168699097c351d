//! Postgres enum mappings.

use orbit_core::policy::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `user_role` database enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Full access, including user administration and sign-offs.
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    /// Read access scoped to the user's own transactions.
    #[sea_orm(string_value = "VIEWER")]
    Viewer,
}

impl UserRole {
    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Viewer => "VIEWER",
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Viewer => Self::Viewer,
        }
    }
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Viewer => Self::Viewer,
        }
    }
}

/// The `payment_method` database enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Cash payment.
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Online transfer or card payment.
    #[sea_orm(string_value = "ONLINE")]
    Online,
    /// Anything else.
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl PaymentMethod {
    /// Wire representation of the payment method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Online => "ONLINE",
            Self::Other => "OTHER",
        }
    }
}
