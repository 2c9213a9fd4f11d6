//! `SeaORM` Entity for move_line_taxes table (taxes applied to a move line).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "move_line_taxes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub move_line_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tax_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::move_lines::Entity",
        from = "Column::MoveLineId",
        to = "super::move_lines::Column::Id"
    )]
    MoveLines,
    #[sea_orm(
        belongs_to = "super::taxes::Entity",
        from = "Column::TaxId",
        to = "super::taxes::Column::Id"
    )]
    Taxes,
}

impl Related<super::move_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoveLines.def()
    }
}

impl Related<super::taxes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Taxes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
