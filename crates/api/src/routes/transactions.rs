//! Transaction routes: listing, mutation, and the admin sign-off flow.
//!
//! Listing is open to any authenticated user but scoped by role before
//! any filter is applied. All mutations and the sign-off endpoints are
//! admin-only.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use orbit_core::policy::{require_admin, transaction_scope};
use orbit_core::signoff::SignOff;
use orbit_db::entities::{sea_orm_active_enums::PaymentMethod, transactions, users};
use orbit_db::{
    CreateTransactionInput, TransactionFilter, TransactionRepository, UpdateTransactionInput,
    UserRepository,
};
use orbit_shared::PageRequest;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/authorized", get(list_authorized))
        .route("/transactions/{id}", put(update_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
        .route("/transactions/{id}/authorize", post(set_authorization))
        .route("/transactions/{id}/authorize", get(get_authorization))
}

/// The transaction owner as embedded in list rows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// A transaction as it appears on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Transaction date (YYYY-MM-DD).
    pub date: String,
    /// Transaction amount.
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Optional description.
    pub description: Option<String>,
    /// Payment method (`CASH`, `ONLINE`, `OTHER`).
    pub payment_method: &'static str,
    /// Counterparty name.
    pub party_name: String,
    /// Optional invoice image reference.
    pub invoice_image: Option<String>,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Whether an admin signed the transaction off.
    pub requires_auth: bool,
    /// The admin who signed off.
    pub authorized_by: Option<Uuid>,
    /// When the sign-off happened.
    pub authorized_at: Option<String>,
    /// Row creation time.
    pub created_at: String,
    /// Row update time.
    pub updated_at: String,
    /// Owner details, present on rows fetched with their user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<OwnerResponse>,
}

impl TransactionResponse {
    fn from_row(transaction: transactions::Model, owner: Option<users::Model>) -> Self {
        Self {
            id: transaction.id,
            date: transaction.date.to_string(),
            amount: transaction.amount,
            category: transaction.category,
            description: transaction.description,
            payment_method: transaction.payment_method.as_str(),
            party_name: transaction.party_name,
            invoice_image: transaction.invoice_image,
            user_id: transaction.user_id,
            requires_auth: transaction.requires_auth,
            authorized_by: transaction.authorized_by,
            authorized_at: transaction.authorized_at.map(|at| at.to_rfc3339()),
            created_at: transaction.created_at.to_rfc3339(),
            updated_at: transaction.updated_at.to_rfc3339(),
            user: owner.map(|u| OwnerResponse {
                id: u.id,
                name: u.name,
                email: u.email,
            }),
        }
    }
}

impl From<transactions::Model> for TransactionResponse {
    fn from(transaction: transactions::Model) -> Self {
        Self::from_row(transaction, None)
    }
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Page size.
    pub limit: Option<u64>,
    /// Rows to skip.
    pub offset: Option<u64>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact payment method match.
    pub payment_method: Option<PaymentMethod>,
    /// Case-insensitive substring match on the counterparty name.
    pub party_name: Option<String>,
    /// Inclusive date range start (YYYY-MM-DD).
    pub from_date: Option<NaiveDate>,
    /// Inclusive date range end (YYYY-MM-DD).
    pub to_date: Option<NaiveDate>,
    /// Inclusive amount lower bound.
    pub min_amount: Option<Decimal>,
    /// Inclusive amount upper bound.
    pub max_amount: Option<Decimal>,
}

/// Request body for creating or replacing a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransactionRequest {
    /// Transaction date (YYYY-MM-DD). Required.
    pub date: Option<NaiveDate>,
    /// Transaction amount. Required.
    pub amount: Option<Decimal>,
    /// Category label. Required.
    pub category: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Payment method. Required.
    pub payment_method: Option<PaymentMethod>,
    /// Counterparty name. Required.
    pub party_name: Option<String>,
    /// Optional invoice image reference.
    pub invoice_image: Option<String>,
}

/// Request body for the sign-off toggle.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorizeRequest {
    /// Must be a JSON boolean.
    pub authorized: Option<serde_json::Value>,
}

/// GET `/transactions` - List transactions, role-scoped, filtered, paginated.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = transaction_scope(auth.role(), auth.user_id());
    let filter = TransactionFilter {
        category: query.category,
        payment_method: query.payment_method,
        party_name: query.party_name,
        date_from: query.from_date,
        date_to: query.to_date,
        amount_min: query.min_amount,
        amount_max: query.max_amount,
    };
    let page = PageRequest {
        limit: query.limit.unwrap_or(10),
        offset: query.offset.unwrap_or(0),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let result = repo.list(scope, filter, page).await?;

    let transactions: Vec<TransactionResponse> = result
        .rows
        .into_iter()
        .map(|(transaction, owner)| TransactionResponse::from_row(transaction, owner))
        .collect();

    Ok(Json(json!({
        "transactions": transactions,
        "total": result.total,
        "limit": page.limit,
        "offset": page.offset
    })))
}

/// POST `/transactions` - Create a transaction owned by the caller.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<TransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let (Some(date), Some(amount), Some(category), Some(payment_method), Some(party_name)) = (
        request.date,
        request.amount,
        request.category,
        request.payment_method,
        request.party_name,
    ) else {
        return Err(ApiError::validation("Missing required fields"));
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let transaction = repo
        .create(CreateTransactionInput {
            date,
            amount,
            category,
            description: request.description,
            payment_method,
            party_name,
            invoice_image: request.invoice_image,
            user_id: auth.user_id(),
        })
        .await?;

    info!(transaction_id = %transaction.id, "transaction created");

    let user_repo = UserRepository::new((*state.db).clone());
    let owner = user_repo.find_by_id(transaction.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Transaction created successfully",
            "transaction": TransactionResponse::from_row(transaction, owner)
        })),
    ))
}

/// PUT `/transactions/{id}` - Replace the editable fields of a transaction.
///
/// The owner and sign-off state survive the replacement.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<TransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let (Some(date), Some(amount), Some(category), Some(payment_method), Some(party_name)) = (
        request.date,
        request.amount,
        request.category,
        request.payment_method,
        request.party_name,
    ) else {
        return Err(ApiError::validation("Missing required fields"));
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let transaction = repo
        .update(
            id,
            UpdateTransactionInput {
                date,
                amount,
                category,
                description: request.description,
                payment_method,
                party_name,
                invoice_image: request.invoice_image,
            },
        )
        .await?;

    let user_repo = UserRepository::new((*state.db).clone());
    let owner = user_repo.find_by_id(transaction.user_id).await?;

    Ok(Json(json!({
        "message": "Transaction updated successfully",
        "transaction": TransactionResponse::from_row(transaction, owner)
    })))
}

/// DELETE `/transactions/{id}` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let repo = TransactionRepository::new((*state.db).clone());
    repo.delete(id).await?;

    info!(transaction_id = %id, "transaction deleted");

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

/// POST `/transactions/{id}/authorize` - Set or clear the admin sign-off.
async fn set_authorization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AuthorizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let Some(authorized) = request.authorized.as_ref().and_then(serde_json::Value::as_bool)
    else {
        return Err(ApiError::validation("Invalid request body"));
    };

    let signoff = SignOff::apply(authorized, auth.user_id(), Utc::now());

    let repo = TransactionRepository::new((*state.db).clone());
    let transaction = repo.set_signoff(id, signoff).await?;

    let message = if authorized {
        "Transaction authorized successfully"
    } else {
        "Transaction authorization removed"
    };

    info!(transaction_id = %id, authorized, "sign-off changed");

    Ok(Json(json!({
        "message": message,
        "transaction": TransactionResponse::from(transaction)
    })))
}

/// GET `/transactions/{id}/authorize` - Read the sign-off state.
async fn get_authorization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let repo = TransactionRepository::new((*state.db).clone());
    let Some(transaction) = repo.find_by_id(id).await? else {
        return Err(ApiError::not_found("Transaction not found"));
    };

    Ok(Json(json!({
        "transaction": {
            "id": transaction.id,
            "requiresAuth": transaction.requires_auth,
            "authorizedBy": transaction.authorized_by,
            "authorizedAt": transaction.authorized_at.map(|at| at.to_rfc3339()),
            "createdAt": transaction.created_at.to_rfc3339(),
            "updatedAt": transaction.updated_at.to_rfc3339()
        }
    })))
}

/// GET `/transactions/authorized` - Transactions the caller signed off.
async fn list_authorized(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(auth.role())?;

    let repo = TransactionRepository::new((*state.db).clone());
    let rows = repo.list_authorized_by(auth.user_id()).await?;

    let authorized: Vec<TransactionResponse> = rows
        .into_iter()
        .map(|(transaction, owner)| TransactionResponse::from_row(transaction, owner))
        .collect();
    let count = authorized.len();

    Ok(Json(json!({
        "authorizedTransactions": authorized,
        "count": count
    })))
}
