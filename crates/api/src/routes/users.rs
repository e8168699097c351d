//! User administration routes.
//!
//! All endpoints require the admin role. Admin accounts themselves are
//! immutable through these paths: they cannot be edited, deleted, or
//! created here.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use orbit_core::auth::hash_password;
use orbit_core::policy::{
    Role, check_toggle_active, check_user_create, check_user_delete, check_user_update,
    require_admin,
};
use orbit_db::entities::{sea_orm_active_enums::UserRole, users};
use orbit_db::{PermissionRepository, UpdateUserInput, UserRepository};

/// Creates the user administration routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users", post(create_user))
        .route("/admin/users/{id}", put(update_user))
        .route("/admin/users/{id}", delete(delete_user))
        .route("/admin/users/{id}/toggle-active", patch(toggle_active))
}

/// A user as it appears on the wire. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role (`ADMIN` or `VIEWER`).
    pub role: &'static str,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account may download reports.
    pub can_download: bool,
    /// Account creation time.
    pub created_at: String,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.as_str(),
            is_active: user.is_active,
            can_download: user.can_download,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password to hash.
    pub password: Option<String>,
    /// Display name. Defaults to the email address.
    pub name: Option<String>,
    /// Requested role. `ADMIN` is rejected.
    pub role: Option<String>,
    /// Report download flag.
    pub can_download: Option<bool>,
}

/// Request body for updating a user. Absent fields keep their value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New plain-text password. Blank keeps the stored hash.
    pub password: Option<String>,
    /// New role. `ADMIN` is rejected.
    pub role: Option<String>,
    /// New report download flag.
    pub can_download: Option<bool>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Request body for the activate/deactivate toggle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToggleActiveRequest {
    /// Desired active state.
    pub is_active: Option<bool>,
}

/// GET `/admin/users` - List all users, newest first.
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let user_repo = UserRepository::new((*state.db).clone());
    let users: Vec<UserResponse> = user_repo
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(json!({ "users": users })))
}

/// POST `/admin/users` - Create a viewer account.
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::validation("Email and password are required"));
    };

    let requested_role = request.role.as_deref().and_then(Role::parse);
    if check_user_create(requested_role).is_err() {
        return Err(ApiError::forbidden("Cannot create admin users"));
    }

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.email_exists(&email).await? {
        return Err(ApiError::conflict("User with this email already exists"));
    }

    let password_hash = hash_password(&password)?;
    let name = request.name.unwrap_or_else(|| email.clone());
    let user = user_repo
        .create(
            &email,
            &password_hash,
            &name,
            UserRole::Viewer,
            request.can_download.unwrap_or(false),
        )
        .await?;

    let permission_repo = PermissionRepository::new((*state.db).clone());
    permission_repo.attach_all(user.id).await?;

    info!(user_id = %user.id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": UserResponse::from(user)
        })),
    ))
}

/// PUT `/admin/users/{id}` - Partially update a non-admin account.
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(target) = user_repo.find_by_id(id).await? else {
        return Err(ApiError::not_found("User not found"));
    };

    let requested_role = request.role.as_deref().and_then(Role::parse);
    check_user_update(target.role.into(), requested_role)?;

    if let Some(new_email) = &request.email
        && new_email != &target.email
        && user_repo.email_exists(new_email).await?
    {
        return Err(ApiError::conflict("User with this email already exists"));
    }

    // A blank password means "keep the stored hash".
    let password_hash = match request.password.as_deref().map(str::trim) {
        Some(password) if !password.is_empty() => Some(hash_password(password)?),
        _ => None,
    };

    let user = user_repo
        .update(
            id,
            UpdateUserInput {
                name: request.name,
                email: request.email,
                password_hash,
                role: requested_role.map(UserRole::from),
                can_download: request.can_download,
                is_active: request.is_active,
            },
        )
        .await?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": UserResponse::from(user)
    })))
}

/// DELETE `/admin/users/{id}` - Delete a non-admin account.
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(target) = user_repo.find_by_id(id).await? else {
        return Err(ApiError::not_found("User not found"));
    };

    if check_user_delete(target.role.into()).is_err() {
        return Err(ApiError::forbidden("Cannot delete admin users"));
    }

    user_repo.delete(id).await?;

    info!(user_id = %id, "user deleted");

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// PATCH `/admin/users/{id}/toggle-active` - Activate or deactivate an account.
async fn toggle_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ToggleActiveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let Some(is_active) = request.is_active else {
        return Err(ApiError::validation("Invalid request body"));
    };

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    check_toggle_active(auth.user_id(), id, is_active)?;

    let user = user_repo.set_active(id, is_active).await?;

    let message = if is_active {
        "User activated successfully"
    } else {
        "User deactivated successfully"
    };

    Ok(Json(json!({
        "message": message,
        "user": UserResponse::from(user)
    })))
}

/// Router tests for the request paths that reject before any database
/// access.
#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, CONTENT_TYPE},
        },
        middleware::from_fn_with_state,
    };
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;

    use orbit_shared::{JwtConfig, JwtService};

    use crate::middleware::auth::auth_middleware;

    use super::*;

    fn test_state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::default()),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        }
    }

    fn test_app(state: AppState) -> axum::Router {
        axum::Router::new()
            .merge(routes())
            .layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    fn token_for(state: &AppState, role: &str) -> String {
        state
            .jwt_service
            .generate_token(Uuid::new_v4(), "user@example.com", role, vec![])
            .expect("should generate token")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_users_requires_admin() {
        let state = test_state();
        let token = token_for(&state, "VIEWER");

        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .uri("/admin/users")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Insufficient permissions");
    }

    #[tokio::test]
    async fn test_create_user_missing_credentials() {
        let state = test_state();
        let token = token_for(&state, "ADMIN");

        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/users")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Email and password are required");
    }

    #[tokio::test]
    async fn test_create_user_rejects_admin_role() {
        let state = test_state();
        let token = token_for(&state, "ADMIN");
        let body = r#"{"email":"new@example.com","password":"secret123","role":"ADMIN"}"#;

        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/users")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Cannot create admin users");
    }

    #[tokio::test]
    async fn test_toggle_active_requires_flag() {
        let state = test_state();
        let token = token_for(&state, "ADMIN");
        let uri = format!("/admin/users/{}/toggle-active", Uuid::new_v4());

        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(uri)
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid request body");
    }
}
