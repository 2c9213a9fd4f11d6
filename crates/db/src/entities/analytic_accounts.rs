//! `SeaORM` Entity for analytic_accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "analytic_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub plan_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::analytic_lines::Entity")]
    AnalyticLines,
}

impl Related<super::analytic_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnalyticLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
