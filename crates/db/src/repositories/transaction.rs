//! Transaction repository for database operations on tracked transactions.

use chrono::NaiveDate;
use orbit_core::dashboard::{DashboardStats, PeriodWindows};
use orbit_core::policy::TransactionScope;
use orbit_core::signoff::SignOff;
use orbit_shared::types::PageRequest;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::PaymentMethod, transactions, users};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction amount.
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Counterparty name.
    pub party_name: String,
    /// Optional invoice image reference.
    pub invoice_image: Option<String>,
    /// Owning user.
    pub user_id: Uuid,
}

/// Replacement values for an existing transaction.
///
/// The owner and the sign-off columns are never touched by updates.
#[derive(Debug, Clone)]
pub struct UpdateTransactionInput {
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction amount.
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Counterparty name.
    pub party_name: String,
    /// Optional invoice image reference.
    pub invoice_image: Option<String>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact payment method match.
    pub payment_method: Option<PaymentMethod>,
    /// Case-insensitive substring match on the counterparty name.
    pub party_name: Option<String>,
    /// Inclusive date range start.
    pub date_from: Option<NaiveDate>,
    /// Inclusive date range end.
    pub date_to: Option<NaiveDate>,
    /// Inclusive amount lower bound.
    pub amount_min: Option<Decimal>,
    /// Inclusive amount upper bound.
    pub amount_max: Option<Decimal>,
}

/// One page of transactions with their owners.
#[derive(Debug, Clone)]
pub struct TransactionPage {
    /// Rows in page order, each with its owning user.
    pub rows: Vec<(transactions::Model, Option<users::Model>)>,
    /// Total row count for the scope and filter, ignoring pagination.
    pub total: u64,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new transaction in the unflagged sign-off state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            date: Set(input.date),
            amount: Set(input.amount),
            category: Set(input.category),
            description: Set(input.description),
            payment_method: Set(input.payment_method),
            party_name: Set(input.party_name),
            invoice_image: Set(input.invoice_image),
            user_id: Set(input.user_id),
            requires_auth: Set(false),
            authorized_by: Set(None),
            authorized_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        transaction.insert(&self.db).await
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists transactions for a visibility scope with optional filters,
    /// newest first, with their owning users.
    ///
    /// The scope predicate is applied before any user-supplied filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: TransactionScope,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<TransactionPage, TransactionError> {
        let total = Self::filtered(Self::scoped(scope), filter.clone())
            .count(&self.db)
            .await?;

        let rows = Self::list_query(scope, filter, page)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;

        Ok(TransactionPage { rows, total })
    }

    /// Lists transactions for report generation, newest first, without
    /// pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_report(
        &self,
        scope: TransactionScope,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        Self::filtered(Self::scoped(scope), filter)
            .order_by_desc(transactions::Column::Date)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists every transaction, oldest first. Used by backups.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists transactions signed off by the given admin, most recent
    /// sign-off first, each with its owning user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_authorized_by(
        &self,
        admin_id: Uuid,
    ) -> Result<Vec<(transactions::Model, Option<users::Model>)>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::RequiresAuth.eq(true))
            .filter(transactions::Column::AuthorizedBy.eq(admin_id))
            .order_by_desc(transactions::Column::AuthorizedAt)
            .order_by_asc(transactions::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
    }

    /// Replaces the editable fields of a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found or the database
    /// operation fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction = transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let mut active: transactions::ActiveModel = transaction.into();
        active.date = Set(input.date);
        active.amount = Set(input.amount);
        active.category = Set(input.category);
        active.description = Set(input.description);
        active.payment_method = Set(input.payment_method);
        active.party_name = Set(input.party_name);
        active.invoice_image = Set(input.invoice_image);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found or the database
    /// operation fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), TransactionError> {
        transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        transactions::Entity::delete_by_id(id).exec(&self.db).await?;

        Ok(())
    }

    /// Writes a sign-off state onto a transaction.
    ///
    /// The three sign-off columns always change together.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found or the database
    /// operation fails.
    pub async fn set_signoff(
        &self,
        id: Uuid,
        signoff: SignOff,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction = transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let mut active: transactions::ActiveModel = transaction.into();
        active.requires_auth = Set(signoff.requires_auth);
        active.authorized_by = Set(signoff.authorized_by);
        active.authorized_at = Set(signoff.authorized_at.map(Into::into));
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Counts all transactions and sums their amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_and_total(&self) -> Result<(u64, Decimal), DbErr> {
        let rows = transactions::Entity::find().all(&self.db).await?;
        let total: Decimal = rows.iter().map(|t| t.amount).sum();
        let count = u64::try_from(rows.len()).unwrap_or(u64::MAX);

        Ok((count, total))
    }

    /// Computes role-scoped dashboard aggregates for the given period
    /// windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn dashboard_stats(
        &self,
        scope: TransactionScope,
        windows: PeriodWindows,
    ) -> Result<DashboardStats, DbErr> {
        // The week window can reach into the previous month, so the
        // fetch starts at the earlier of the two bounds.
        let window_start = windows.week_start.min(windows.month_start);

        let rows = Self::scoped(scope)
            .filter(transactions::Column::Date.gte(window_start))
            .filter(transactions::Column::Date.lte(windows.today))
            .all(&self.db)
            .await?;

        let mut total_today = 0u64;
        let mut total_amount_today = Decimal::ZERO;
        let mut total_amount_week = Decimal::ZERO;
        let mut total_amount_month = Decimal::ZERO;

        for row in &rows {
            if row.date == windows.today {
                total_today += 1;
                total_amount_today += row.amount;
            }
            if row.date >= windows.week_start {
                total_amount_week += row.amount;
            }
            if row.date >= windows.month_start {
                total_amount_month += row.amount;
            }
        }

        let total_transactions = Self::scoped(scope).count(&self.db).await?;

        Ok(DashboardStats {
            total_today,
            total_amount_today,
            total_amount_week,
            total_amount_month,
            total_transactions,
        })
    }

    /// Starts a find with the scope predicate applied.
    fn scoped(scope: TransactionScope) -> Select<transactions::Entity> {
        let query = transactions::Entity::find();
        match scope.owner() {
            Some(user_id) => query.filter(transactions::Column::UserId.eq(user_id)),
            None => query,
        }
    }

    /// Applies the optional filters to a select.
    fn filtered(
        mut query: Select<transactions::Entity>,
        filter: TransactionFilter,
    ) -> Select<transactions::Entity> {
        if let Some(category) = filter.category {
            query = query.filter(transactions::Column::Category.eq(category));
        }

        if let Some(payment_method) = filter.payment_method {
            query = query.filter(transactions::Column::PaymentMethod.eq(payment_method));
        }

        if let Some(party_name) = filter.party_name {
            let pattern = format!("%{}%", escape_like(&party_name).to_lowercase());
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    transactions::Entity,
                    transactions::Column::PartyName,
                ))))
                .like(pattern),
            );
        }

        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::Date.gte(date_from));
        }

        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::Date.lte(date_to));
        }

        if let Some(amount_min) = filter.amount_min {
            query = query.filter(transactions::Column::Amount.gte(amount_min));
        }

        if let Some(amount_max) = filter.amount_max {
            query = query.filter(transactions::Column::Amount.lte(amount_max));
        }

        query
    }

    /// Builds the ordered, paginated list select.
    fn list_query(
        scope: TransactionScope,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Select<transactions::Entity> {
        Self::filtered(Self::scoped(scope), filter)
            .order_by_desc(transactions::Column::Date)
            .order_by_asc(transactions::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
    }
}

/// Escapes LIKE wildcard characters in user-supplied match text.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
