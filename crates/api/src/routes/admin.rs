//! Admin overview routes: aggregate counters and the backup export.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use orbit_core::policy::require_admin;
use orbit_core::reports::{BackupService, BackupTransaction, BackupUser};
use orbit_db::{TransactionRepository, UserRepository};

/// Creates the admin overview routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(admin_stats))
        .route("/admin/backup", get(create_backup))
}

/// GET `/admin/stats` - User and transaction totals for the admin panel.
async fn admin_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let user_repo = UserRepository::new((*state.db).clone());
    let transaction_repo = TransactionRepository::new((*state.db).clone());

    let total_users = user_repo.count_all().await?;
    let active_users = user_repo.count_active().await?;
    let (total_transactions, total_amount) = transaction_repo.count_and_total().await?;

    Ok(Json(json!({
        "totalUsers": total_users,
        "activeUsers": active_users,
        "totalTransactions": total_transactions,
        "totalAmount": total_amount
    })))
}

/// GET `/admin/backup` - Full data export as base64-encoded JSON.
///
/// Password hashes never leave the database; the export carries every
/// other user column plus all transactions.
async fn create_backup(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let user_repo = UserRepository::new((*state.db).clone());
    let users: Vec<BackupUser> = user_repo
        .list()
        .await?
        .into_iter()
        .map(|user| BackupUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
            can_download: user.can_download,
            created_at: user.created_at.to_utc(),
        })
        .collect();

    let transaction_repo = TransactionRepository::new((*state.db).clone());
    let transactions: Vec<BackupTransaction> = transaction_repo
        .list_all()
        .await?
        .into_iter()
        .map(|transaction| BackupTransaction {
            id: transaction.id,
            date: transaction.date,
            amount: transaction.amount,
            category: transaction.category,
            description: transaction.description,
            payment_method: transaction.payment_method.as_str().to_string(),
            party_name: transaction.party_name,
            invoice_image: transaction.invoice_image,
            user_id: transaction.user_id,
            requires_auth: transaction.requires_auth,
            authorized_by: transaction.authorized_by,
            authorized_at: transaction.authorized_at.map(|at| at.to_utc()),
            created_at: transaction.created_at.to_utc(),
            updated_at: transaction.updated_at.to_utc(),
        })
        .collect();

    let document = BackupService::assemble(users, transactions, Utc::now());
    let payload = serde_json::to_string_pretty(&document)?;
    let encoded = STANDARD.encode(payload);

    info!(
        users = document.summary.total_users,
        transactions = document.summary.total_transactions,
        "backup exported"
    );

    Ok(Json(json!({
        "message": "Backup created successfully",
        "backup": encoded,
        "timestamp": document.generated_at.to_rfc3339()
    })))
}
