//! Computed financial columns on projects.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ADD_COLUMNS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_COLUMNS_SQL).await?;
        Ok(())
    }
}

const ADD_COLUMNS_SQL: &str = r"
ALTER TABLE projects
    ADD COLUMN IF NOT EXISTS customer_invoiced_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS customer_paid_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS customer_outstanding_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS customer_skonto_taken NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS vendor_bills_total NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS vendor_skonto_received NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS total_costs_net NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS total_costs_with_tax NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS profit_loss NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS negative_difference NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS total_hours_booked NUMERIC(19, 2) NOT NULL DEFAULT 0,
    ADD COLUMN IF NOT EXISTS labor_costs NUMERIC(19, 2) NOT NULL DEFAULT 0;
";

/// Removes every computed column. Also used by the uninstall teardown.
pub(crate) const DROP_COLUMNS_SQL: &str = r"
ALTER TABLE projects
    DROP COLUMN IF EXISTS customer_invoiced_amount,
    DROP COLUMN IF EXISTS customer_paid_amount,
    DROP COLUMN IF EXISTS customer_outstanding_amount,
    DROP COLUMN IF EXISTS customer_skonto_taken,
    DROP COLUMN IF EXISTS vendor_bills_total,
    DROP COLUMN IF EXISTS vendor_skonto_received,
    DROP COLUMN IF EXISTS total_costs_net,
    DROP COLUMN IF EXISTS total_costs_with_tax,
    DROP COLUMN IF EXISTS profit_loss,
    DROP COLUMN IF EXISTS negative_difference,
    DROP COLUMN IF EXISTS total_hours_booked,
    DROP COLUMN IF EXISTS labor_costs;
";
