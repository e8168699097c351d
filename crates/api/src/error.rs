//! Maps domain and repository errors onto HTTP responses.
//!
//! Every error leaves the API as `{"error": "<message>"}` with the
//! status from the [`AppError`] taxonomy. Database and internal
//! failures are logged server-side and surface as a generic 500 body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;

use orbit_core::auth::PasswordError;
use orbit_core::policy::PolicyError;
use orbit_core::reports::ReportError;
use orbit_db::{TransactionError, UserError};
use orbit_shared::{AppError, JwtError};

/// Error type returned by route handlers.
///
/// Wraps [`AppError`] so handlers can use `?` on repository and domain
/// calls while the response shape stays uniform.
#[derive(Debug)]
pub struct ApiError(AppError);

impl ApiError {
    /// 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403 with the given message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 409 with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self(AppError::Conflict(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl From<DbErr> for ApiError {
    fn from(error: DbErr) -> Self {
        Self(AppError::Database(error.to_string()))
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::NotFound(_) => Self(AppError::NotFound("User not found".to_string())),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(error: TransactionError) -> Self {
        match error {
            TransactionError::NotFound(_) => {
                Self(AppError::NotFound("Transaction not found".to_string()))
            }
            TransactionError::Database(e) => e.into(),
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(error: PolicyError) -> Self {
        // The policy display strings are the wire messages.
        match error.status_code() {
            400 => Self(AppError::Validation(error.to_string())),
            _ => Self(AppError::Forbidden(error.to_string())),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        Self(AppError::Internal(error.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(error: JwtError) -> Self {
        Self(AppError::Internal(error.to_string()))
    }
}

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        Self(AppError::Internal(error.to_string()))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self(AppError::Internal(error.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match self.0 {
            AppError::Unauthorized(m)
            | AppError::Forbidden(m)
            | AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Conflict(m) => m,
            AppError::Database(detail) | AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use uuid::Uuid;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_wire_shape_is_error_message() {
        let response = ApiError::conflict("User with this email already exists").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["error"], "User with this email already exists");
    }

    #[tokio::test]
    async fn test_database_errors_become_generic_500() {
        let error: ApiError = DbErr::Custom("connection reset".to_string()).into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_repository_not_found_mapping() {
        let user: ApiError = UserError::NotFound(Uuid::new_v4()).into();
        assert_eq!(user.0.status_code(), 404);

        let transaction: ApiError = TransactionError::NotFound(Uuid::new_v4()).into();
        assert_eq!(transaction.0.status_code(), 404);
    }

    #[test]
    fn test_policy_mapping_keeps_display_text() {
        let forbidden: ApiError = PolicyError::AdminRequired.into();
        assert_eq!(forbidden.0.status_code(), 403);

        let validation: ApiError = PolicyError::SelfDeactivation.into();
        assert_eq!(validation.0.status_code(), 400);
        assert!(matches!(
            validation.0,
            AppError::Validation(m) if m == "Cannot deactivate your own account"
        ));
    }
}
