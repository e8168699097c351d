//! Report generation route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use orbit_core::policy::{check_report_access, transaction_scope};
use orbit_core::reports::{PdfRenderer, ReportFilter, ReportTransaction, TransactionReport};
use orbit_db::entities::sea_orm_active_enums::PaymentMethod;
use orbit_db::{TransactionFilter, TransactionRepository, UserRepository};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/generate", post(generate_report))
}

/// Request body for report generation. All filters are optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateReportRequest {
    /// Inclusive date range start (YYYY-MM-DD).
    pub from_date: Option<NaiveDate>,
    /// Inclusive date range end (YYYY-MM-DD).
    pub to_date: Option<NaiveDate>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact payment method match.
    pub payment_method: Option<PaymentMethod>,
}

/// POST `/reports/generate` - Render a filtered transaction report PDF.
///
/// The download permission is read from the database on every call, not
/// from the token, so a revoked flag takes effect immediately.
async fn generate_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<GenerateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo.find_by_id(auth.user_id()).await? else {
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    check_report_access(user.role.into(), user.can_download)?;

    let scope = transaction_scope(user.role.into(), user.id);
    let filter = TransactionFilter {
        category: request.category.clone(),
        payment_method: request.payment_method,
        date_from: request.from_date,
        date_to: request.to_date,
        ..TransactionFilter::default()
    };

    let transaction_repo = TransactionRepository::new((*state.db).clone());
    let rows: Vec<ReportTransaction> = transaction_repo
        .list_for_report(scope, filter)
        .await?
        .into_iter()
        .map(|transaction| ReportTransaction {
            date: transaction.date,
            category: transaction.category,
            description: transaction.description,
            payment_method: transaction.payment_method.as_str().to_string(),
            party_name: transaction.party_name,
            amount: transaction.amount,
        })
        .collect();

    let report_filter = ReportFilter {
        from_date: request.from_date,
        to_date: request.to_date,
        category: request.category,
        payment_method: request.payment_method.map(|m| m.as_str().to_string()),
    };
    let report = TransactionReport::new(report_filter, rows, Utc::now());
    let pdf = PdfRenderer::render(&report)?;

    info!(
        user_id = %user.id,
        rows = report.summary.count,
        bytes = pdf.len(),
        "report generated"
    );

    Ok(Json(json!({
        "message": "Report generated successfully",
        "pdfData": format!("data:application/pdf;base64,{}", STANDARD.encode(pdf))
    })))
}
