//! Shared types, errors, and configuration for Orbit.
//!
//! This crate provides common types used across all other crates:
//! - JWT claims and token service
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::PageRequest;

mod error_tests;
mod jwt_tests;
