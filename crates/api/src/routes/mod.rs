//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod reports;
pub mod transactions;
pub mod users;

/// Creates the API router: public routes merged with the protected
/// routes behind the auth middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(transactions::routes())
        .merge(users::routes())
        .merge(admin::routes())
        .merge(reports::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
