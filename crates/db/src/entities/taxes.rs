//! `SeaORM` Entity for taxes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "taxes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub amount_type: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::move_line_taxes::Entity")]
    MoveLineTaxes,
}

impl Related<super::move_line_taxes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoveLineTaxes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
