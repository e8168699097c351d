//! Authentication routes: login, signup, logout, and the one-time
//! admin bootstrap.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError, routes::users::UserResponse};
use orbit_core::auth::{hash_password, verify_password};
use orbit_core::policy::{Role, check_signup_role};
use orbit_db::entities::sea_orm_active_enums::UserRole;
use orbit_db::{PermissionRepository, UserRepository};

/// Creates the authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
        .route("/check-admin", get(check_admin))
        .route("/setup-admin", post(setup_admin))
}

/// Request body for login.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Display name. Defaults to the email address.
    pub name: Option<String>,
    /// Requested role. `ADMIN` is rejected.
    pub role: Option<String>,
}

/// Request body for the admin bootstrap.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupAdminRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Display name. Defaults to the email address.
    pub name: Option<String>,
}

/// POST `/auth/login` - Verify credentials and issue a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::validation("Missing email or password"));
    };

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo.find_by_email(&email).await? else {
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !verify_password(&password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    if !user.is_active {
        return Err(ApiError::unauthorized("Account is deactivated"));
    }

    let permission_repo = PermissionRepository::new((*state.db).clone());
    let permissions = permission_repo.modules_for_user(user.id).await?;

    let token = state
        .jwt_service
        .generate_token(user.id, &user.email, user.role.as_str(), permissions)?;

    info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({
        "token": token,
        "user": UserResponse::from(user)
    })))
}

/// POST `/auth/signup` - Self-service registration. Always creates a viewer.
async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::validation("Email and password are required"));
    };

    let requested_role = request.role.as_deref().and_then(Role::parse);
    check_signup_role(requested_role)?;

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.email_exists(&email).await? {
        return Err(ApiError::conflict("User with this email already exists"));
    }

    let password_hash = hash_password(&password)?;
    let name = request.name.unwrap_or_else(|| email.clone());
    let user = user_repo
        .create(&email, &password_hash, &name, UserRole::Viewer, false)
        .await?;

    let permission_repo = PermissionRepository::new((*state.db).clone());
    permission_repo.attach_all(user.id).await?;
    let permissions = permission_repo.modules_for_user(user.id).await?;

    let token = state
        .jwt_service
        .generate_token(user.id, &user.email, user.role.as_str(), permissions)?;

    info!(user_id = %user.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": UserResponse::from(user),
            "token": token
        })),
    ))
}

/// POST `/auth/logout` - Stateless logout; the client discards the token.
async fn logout() -> impl IntoResponse {
    Json(json!({ "message": "Logout successful" }))
}

/// GET `/check-admin` - Reports whether any admin account exists.
async fn check_admin(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());
    let has_admin = user_repo.has_admin().await?;

    Ok(Json(json!({ "hasAdmin": has_admin })))
}

/// POST `/setup-admin` - One-time bootstrap of the first admin account.
///
/// Rejected once any admin row exists; no token is issued.
async fn setup_admin(
    State(state): State<AppState>,
    Json(request): Json<SetupAdminRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::validation("Email and password are required"));
    };

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.has_admin().await? {
        return Err(ApiError::conflict("Admin user already exists"));
    }

    let password_hash = hash_password(&password)?;
    let name = request.name.unwrap_or_else(|| email.clone());
    let admin = user_repo
        .create(&email, &password_hash, &name, UserRole::Admin, true)
        .await?;

    let permission_repo = PermissionRepository::new((*state.db).clone());
    permission_repo.attach_all(admin.id).await?;

    info!(user_id = %admin.id, "admin account bootstrapped");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Admin user created successfully",
            "admin": UserResponse::from(admin)
        })),
    ))
}

/// Router tests for the request paths that reject before any database
/// access. Flows that read or write rows live in the db crate's
/// integration tests.
#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;

    use orbit_shared::{JwtConfig, JwtService};

    use super::*;

    fn test_app() -> Router {
        let state = AppState {
            db: Arc::new(DatabaseConnection::default()),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        };
        routes().with_state(state)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_logout_is_stateless() {
        let response = test_app()
            .oneshot(json_post("/auth/logout", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Logout successful");
    }

    #[tokio::test]
    async fn test_login_missing_credentials() {
        let response = test_app()
            .oneshot(json_post("/auth/login", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing email or password");
    }

    #[tokio::test]
    async fn test_signup_missing_credentials() {
        let response = test_app()
            .oneshot(json_post("/auth/signup", r#"{"name":"No Creds"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Email and password are required");
    }

    #[tokio::test]
    async fn test_signup_rejects_admin_role() {
        let body = r#"{"email":"new@example.com","password":"secret123","role":"ADMIN"}"#;
        let response = test_app()
            .oneshot(json_post("/auth/signup", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Admin users cannot be created through signup");
    }

    #[tokio::test]
    async fn test_setup_admin_missing_credentials() {
        let response = test_app()
            .oneshot(json_post("/setup-admin", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Email and password are required");
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_fields() {
        let body = r#"{"email":"a@example.com","password":"pw","remember_me":true}"#;
        let response = test_app()
            .oneshot(json_post("/auth/login", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
