//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    CreateTransactionInput, PermissionRepository, TransactionError, TransactionFilter,
    TransactionPage, TransactionRepository, UpdateTransactionInput, UpdateUserInput, UserError,
    UserRepository,
};

use orbit_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(&config.url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);
    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "opening database connection pool"
    );
    Database::connect(options).await
}
