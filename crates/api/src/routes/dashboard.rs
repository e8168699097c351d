//! Dashboard statistics route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::Utc;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use orbit_core::dashboard::PeriodWindows;
use orbit_core::policy::transaction_scope;
use orbit_db::TransactionRepository;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(dashboard_stats))
}

/// GET `/dashboard/stats` - Today/week/month rollups, role-scoped.
async fn dashboard_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let scope = transaction_scope(auth.role(), auth.user_id());
    let windows = PeriodWindows::for_date(Utc::now().date_naive());

    let repo = TransactionRepository::new((*state.db).clone());
    let stats = repo.dashboard_stats(scope, windows).await?;

    Ok(Json(stats))
}
