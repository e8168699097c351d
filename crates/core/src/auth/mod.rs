//! Authentication primitives.
//!
//! Password hashing only; token handling lives in `orbit-shared`.

pub mod password;

pub use password::{PasswordError, hash_password, verify_password};
