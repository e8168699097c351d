//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod permission;
pub mod transaction;
pub mod user;

pub use permission::PermissionRepository;
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionPage,
    TransactionRepository, UpdateTransactionInput,
};
pub use user::{UpdateUserInput, UserError, UserRepository};
