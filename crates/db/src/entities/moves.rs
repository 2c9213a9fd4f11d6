//! `SeaORM` Entity for moves table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "moves")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub move_type: String,
    pub state: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount_residual: Decimal,
    pub reversed_entry_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::move_lines::Entity")]
    MoveLines,
}

impl Related<super::move_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoveLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
