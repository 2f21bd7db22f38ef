//! 评论及回复

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sight_comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub sight_id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub score: i32,
    pub is_top: bool,
    pub love_count: i32,
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
