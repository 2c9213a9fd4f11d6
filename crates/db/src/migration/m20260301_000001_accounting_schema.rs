//! Host accounting schema.
//!
//! Creates the tables the aggregator reads from. In production these belong
//! to the host platform; the migration exists for development and test
//! databases.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ACCOUNTING_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS analytic_lines CASCADE;
DROP TABLE IF EXISTS partial_reconciles CASCADE;
DROP TABLE IF EXISTS move_line_taxes CASCADE;
DROP TABLE IF EXISTS move_lines CASCADE;
DROP TABLE IF EXISTS moves CASCADE;
DROP TABLE IF EXISTS taxes CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS analytic_accounts CASCADE;
",
        )
        .await?;
        Ok(())
    }
}

const ACCOUNTING_SQL: &str = r"
-- Cost centers
CREATE TABLE analytic_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    code VARCHAR(50),
    plan_id UUID
);

CREATE INDEX idx_analytic_accounts_plan ON analytic_accounts(plan_id);

-- Projects (computed columns are added by the project analytics migration)
CREATE TABLE projects (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    partner_name VARCHAR(255),
    user_name VARCHAR(255),
    account_id UUID REFERENCES analytic_accounts(id) ON DELETE SET NULL,
    analytic_account_id UUID REFERENCES analytic_accounts(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_projects_account ON projects(account_id);
CREATE INDEX idx_projects_analytic_account ON projects(analytic_account_id);
CREATE INDEX idx_projects_created ON projects(created_at DESC);

-- Chart of accounts
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(64) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type VARCHAR(64) NOT NULL
);

CREATE TABLE taxes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    amount_type VARCHAR(32) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL DEFAULT 0
);

-- Documents (invoices, bills, payments, journal entries)
CREATE TABLE moves (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    move_type VARCHAR(32) NOT NULL,
    state VARCHAR(16) NOT NULL DEFAULT 'draft',
    amount_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    amount_residual NUMERIC(19, 4) NOT NULL DEFAULT 0,
    reversed_entry_id UUID REFERENCES moves(id) ON DELETE SET NULL
);

CREATE INDEX idx_moves_reversed_entry ON moves(reversed_entry_id) WHERE reversed_entry_id IS NOT NULL;

CREATE TABLE move_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    move_id UUID NOT NULL REFERENCES moves(id) ON DELETE CASCADE,
    account_id UUID REFERENCES accounts(id),
    display_type VARCHAR(32) NOT NULL DEFAULT 'product',
    price_subtotal NUMERIC(19, 4) NOT NULL DEFAULT 0,
    price_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    analytic_distribution JSONB
);

CREATE INDEX idx_move_lines_move ON move_lines(move_id);
CREATE INDEX idx_move_lines_distribution ON move_lines USING GIN (analytic_distribution);

CREATE TABLE move_line_taxes (
    move_line_id UUID NOT NULL REFERENCES move_lines(id) ON DELETE CASCADE,
    tax_id UUID NOT NULL REFERENCES taxes(id) ON DELETE CASCADE,
    PRIMARY KEY (move_line_id, tax_id)
);

CREATE TABLE partial_reconciles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    debit_move_line_id UUID NOT NULL REFERENCES move_lines(id) ON DELETE CASCADE,
    credit_move_line_id UUID NOT NULL REFERENCES move_lines(id) ON DELETE CASCADE,
    amount NUMERIC(19, 4) NOT NULL DEFAULT 0
);

CREATE INDEX idx_partials_debit ON partial_reconciles(debit_move_line_id);
CREATE INDEX idx_partials_credit ON partial_reconciles(credit_move_line_id);

-- Analytic entries (timesheets and other costs)
CREATE TABLE analytic_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    account_id UUID NOT NULL REFERENCES analytic_accounts(id) ON DELETE CASCADE,
    project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    is_timesheet BOOLEAN NOT NULL DEFAULT false,
    unit_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    move_line_id UUID REFERENCES move_lines(id) ON DELETE SET NULL
);

CREATE INDEX idx_analytic_lines_account ON analytic_lines(account_id);
";
