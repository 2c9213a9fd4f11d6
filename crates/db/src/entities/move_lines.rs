//! `SeaORM` Entity for move_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "move_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub move_id: Uuid,
    pub account_id: Option<Uuid>,
    pub display_type: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price_subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price_total: Decimal,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub analytic_distribution: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::moves::Entity",
        from = "Column::MoveId",
        to = "super::moves::Column::Id"
    )]
    Moves,
    #[sea_orm(has_many = "super::move_line_taxes::Entity")]
    MoveLineTaxes,
}

impl Related<super::moves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Moves.def()
    }
}

impl Related<super::move_line_taxes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoveLineTaxes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
