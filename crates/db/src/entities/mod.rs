//! `SeaORM` entity definitions.

pub mod permissions;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod user_permissions;
pub mod users;
