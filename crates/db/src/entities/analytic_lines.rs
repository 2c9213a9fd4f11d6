//! `SeaORM` Entity for analytic_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "analytic_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub project_id: Option<Uuid>,
    pub is_timesheet: bool,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub unit_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,
    pub move_line_id: Option<Uuid>,
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
