//! Policy error types.

use thiserror::Error;

/// Errors produced by authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The action requires the admin role.
    #[error("Insufficient permissions")]
    AdminRequired,

    /// The target account holds the admin role, or the admin role was requested.
    #[error("Cannot modify admin users")]
    AdminImmutable,

    /// Signup requested the admin role.
    #[error("Admin users cannot be created through signup")]
    AdminSignupRejected,

    /// An admin attempted to deactivate their own account.
    #[error("Cannot deactivate your own account")]
    SelfDeactivation,

    /// The caller may not download reports.
    #[error("Insufficient permissions to download reports")]
    DownloadNotAllowed,
}

impl PolicyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AdminRequired
            | Self::AdminImmutable
            | Self::AdminSignupRejected
            | Self::DownloadNotAllowed => 403,
            Self::SelfDeactivation => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::AdminImmutable => "ADMIN_IMMUTABLE",
            Self::AdminSignupRejected => "ADMIN_SIGNUP_REJECTED",
            Self::SelfDeactivation => "SELF_DEACTIVATION",
            Self::DownloadNotAllowed => "DOWNLOAD_NOT_ALLOWED",
        }
    }
}
