//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了景点后台的数据模型（SeaORM 实体）。

pub mod comment;
pub mod info;
pub mod sight;
pub mod ticket;

use sea_orm::ColumnTrait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 景点记录
pub type Sight = sight::Model;

/// 景点标记类型
///
/// 精选（TOP）与热门（HOT）各对应一个首页缓存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SightFlag {
    /// 精选
    Top,
    /// 热门
    Hot,
}

impl SightFlag {
    /// 全部标记，按刷新顺序排列
    pub const ALL: [SightFlag; 2] = [SightFlag::Top, SightFlag::Hot];

    /// 标记对应的数据库列
    pub fn column(self) -> sight::Column {
        match self {
            SightFlag::Top => sight::Column::IsTop,
            SightFlag::Hot => sight::Column::IsHot,
        }
    }

    /// 生成 `flag = true` 的过滤条件
    pub fn is_set(self) -> sea_orm::sea_query::SimpleExpr {
        self.column().eq(true)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SightFlag::Top => "top",
            SightFlag::Hot => "hot",
        }
    }
}

impl fmt::Display for SightFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SightFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(SightFlag::Top),
            "hot" => Ok(SightFlag::Hot),
            other => Err(format!("unknown sight flag '{}', expected top or hot", other)),
        }
    }
}
