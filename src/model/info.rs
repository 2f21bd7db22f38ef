//! 景点详细信息

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sight_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sight_id: i32,
    #[sea_orm(column_type = "Text")]
    pub entry_explain: String,
    #[sea_orm(column_type = "Text")]
    pub play_way: String,
    #[sea_orm(column_type = "Text")]
    pub tips: String,
    #[sea_orm(column_type = "Text")]
    pub traffic: String,
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
