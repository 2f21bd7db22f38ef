//! 门票管理

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 成人票
pub const TICKET_TYPE_ADULT: i32 = 1;
/// 儿童票
pub const TICKET_TYPE_CHILD: i32 = 2;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sight_ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sight_id: i32,
    pub name: String,
    pub types: i32,
    pub price: f64,
    pub discount: f64,
    pub total_stock: i32,
    pub remain_stock: i32,
    pub is_valid: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sight::Entity",
        from = "Column::SightId",
        to = "super::sight::Column::Id",
        on_delete = "Cascade"
    )]
    Sight,
}

impl Related<super::sight::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sight.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
