//! Core business logic for Orbit.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, authorization rules, and report transforms live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing
//! - `policy` - Role-based authorization decisions
//! - `signoff` - Per-transaction admin sign-off state machine
//! - `reports` - PDF report and JSON backup renderers
//! - `dashboard` - Dashboard period windows and stat types

pub mod auth;
pub mod dashboard;
pub mod policy;
pub mod reports;
pub mod signoff;
