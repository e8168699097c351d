//! Initial database migration.
//!
//! Creates the enums, core tables, triggers, and seed data for the
//! transaction tracker.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: TRANSACTIONS
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 4: PERMISSIONS
        // ============================================================
        db.execute_unprepared(PERMISSIONS_SQL).await?;
        db.execute_unprepared(USER_PERMISSIONS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        // ============================================================
        // PART 6: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_PERMISSIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM ('ADMIN', 'VIEWER');

-- Payment methods
CREATE TYPE payment_method AS ENUM ('CASH', 'ONLINE', 'OTHER');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    name VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'VIEWER',
    is_active BOOLEAN NOT NULL DEFAULT true,
    can_download BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_role ON users(role);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    date DATE NOT NULL,
    amount NUMERIC(14, 2) NOT NULL,
    category VARCHAR(100) NOT NULL,
    description TEXT,
    payment_method payment_method NOT NULL DEFAULT 'CASH',
    party_name VARCHAR(255) NOT NULL,
    invoice_image TEXT,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    requires_auth BOOLEAN NOT NULL DEFAULT false,
    authorized_by UUID REFERENCES users(id),
    authorized_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_signoff_requires_flag CHECK (
        (requires_auth AND authorized_by IS NOT NULL AND authorized_at IS NOT NULL)
        OR (NOT requires_auth AND authorized_by IS NULL AND authorized_at IS NULL)
    )
);

CREATE INDEX idx_transactions_date ON transactions(date DESC);
CREATE INDEX idx_transactions_user ON transactions(user_id);
CREATE INDEX idx_transactions_category ON transactions(category);
CREATE INDEX idx_transactions_authorized_by ON transactions(authorized_by)
    WHERE requires_auth = true;
";

const PERMISSIONS_SQL: &str = r"
CREATE TABLE permissions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    module VARCHAR(100) NOT NULL,
    name VARCHAR(100) NOT NULL UNIQUE,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const USER_PERMISSIONS_SQL: &str = r"
CREATE TABLE user_permissions (
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    permission_id UUID NOT NULL REFERENCES permissions(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (user_id, permission_id)
);

CREATE INDEX idx_user_permissions_permission ON user_permissions(permission_id);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: set_updated_at
-- Keeps updated_at current on every row update
-- ============================================================
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at := now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at
BEFORE UPDATE ON users
FOR EACH ROW
EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_transactions_updated_at
BEFORE UPDATE ON transactions
FOR EACH ROW
EXECUTE FUNCTION set_updated_at();
";

const SEED_PERMISSIONS_SQL: &str = r"
-- ============================================================
-- SEED: Permission catalog
-- ============================================================
INSERT INTO permissions (module, name, description) VALUES
('dashboard', 'dashboard', 'Access to dashboard'),
('transactions', 'transactions', 'Access to transactions'),
('reports', 'reports', 'Access to reports'),
('admin', 'admin', 'Access to admin panel')
ON CONFLICT (name) DO UPDATE SET
    module = EXCLUDED.module,
    description = EXCLUDED.description;
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

-- Drop triggers
DROP TRIGGER IF EXISTS trg_transactions_updated_at ON transactions;
DROP TRIGGER IF EXISTS trg_users_updated_at ON users;

-- Drop functions
DROP FUNCTION IF EXISTS set_updated_at();

-- Drop tables (reverse order of creation)
DROP TABLE IF EXISTS user_permissions CASCADE;
DROP TABLE IF EXISTS permissions CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS users CASCADE;

-- Drop enums
DROP TYPE IF EXISTS payment_method CASCADE;
DROP TYPE IF EXISTS user_role CASCADE;
";
