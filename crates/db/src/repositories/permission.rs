//! Permission repository for the permission catalog.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{permissions, user_permissions};

/// Permission repository for catalog and assignment queries.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    db: DatabaseConnection,
}

impl PermissionRepository {
    /// Creates a new permission repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the full permission catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<permissions::Model>, DbErr> {
        permissions::Entity::find()
            .order_by_asc(permissions::Column::Module)
            .all(&self.db)
            .await
    }

    /// Lists the permission modules assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn modules_for_user(&self, user_id: Uuid) -> Result<Vec<String>, DbErr> {
        let rows = user_permissions::Entity::find()
            .filter(user_permissions::Column::UserId.eq(user_id))
            .find_also_related(permissions::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, permission)| permission.map(|p| p.module))
            .collect())
    }

    /// Assigns a permission to a user. Already-assigned pairs are left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn attach(&self, user_id: Uuid, permission_id: Uuid) -> Result<(), DbErr> {
        let existing = user_permissions::Entity::find_by_id((user_id, permission_id))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        let assignment = user_permissions::ActiveModel {
            user_id: Set(user_id),
            permission_id: Set(permission_id),
            created_at: Set(chrono::Utc::now().into()),
        };
        assignment.insert(&self.db).await?;

        Ok(())
    }

    /// Assigns every catalog permission to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn attach_all(&self, user_id: Uuid) -> Result<(), DbErr> {
        let catalog = self.list_all().await?;
        for permission in catalog {
            self.attach(user_id, permission.id).await?;
        }

        Ok(())
    }
}
