//! `SeaORM` Entity for projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub partner_name: Option<String>,
    pub user_name: Option<String>,
    pub account_id: Option<Uuid>,
    pub analytic_account_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub customer_invoiced_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub customer_paid_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub customer_outstanding_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub customer_skonto_taken: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub vendor_bills_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub vendor_skonto_received: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub total_costs_net: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub total_costs_with_tax: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub profit_loss: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub negative_difference: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub total_hours_booked: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub labor_costs: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::analytic_accounts::Entity",
        from = "Column::AccountId",
        to = "super::analytic_accounts::Column::Id"
    )]
    AnalyticAccounts,
}

impl Related<super::analytic_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnalyticAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
