//! User repository for account database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Partial update for a user account.
///
/// `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password hash.
    pub password_hash: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New report download flag.
    pub can_download: Option<bool>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        role: UserRole,
        can_download: bool,
    ) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            name: Set(name.to_string()),
            role: Set(role),
            is_active: Set(true),
            can_download: Set(can_download),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Lists all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Applies a partial update to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the database
    /// operation fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<users::Model, UserError> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let mut active: users::ActiveModel = user.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = input.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = input.role {
            active.role = Set(role);
        }
        if let Some(can_download) = input.can_download {
            active.can_download = Set(can_download);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Sets the active flag on a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the database
    /// operation fails.
    pub async fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<users::Model, UserError> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let mut active: users::ActiveModel = user.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a user.
    ///
    /// Owned transactions are removed by the cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the database
    /// operation fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), UserError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))?;

        users::Entity::delete_by_id(id).exec(&self.db).await?;

        Ok(())
    }

    /// Checks if any admin account exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn has_admin(&self) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Admin))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Counts all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_all(&self) -> Result<u64, DbErr> {
        users::Entity::find().count(&self.db).await
    }

    /// Counts active users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_active(&self) -> Result<u64, DbErr> {
        users::Entity::find()
            .filter(users::Column::IsActive.eq(true))
            .count(&self.db)
            .await
    }
}
