//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了景点列表的传输结构与序列化机制。

pub mod json;

use crate::model::Sight;
use crate::repository::SightPage;
use serde::{Deserialize, Serialize};

pub use json::JsonSerializer;

/// 景点列表项
///
/// 只保留首页列表需要的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightItem {
    pub id: i32,
    pub name: String,
    pub main_img: String,
    pub score: i32,
    pub min_price: f64,
    pub province: String,
    pub city: String,
    pub area: Option<String>,
    pub town: Option<String>,
}

impl From<&Sight> for SightItem {
    fn from(sight: &Sight) -> Self {
        Self {
            id: sight.id,
            name: sight.name.clone(),
            main_img: sight.main_img.clone(),
            score: sight.score,
            min_price: sight.min_price,
            province: sight.province.clone(),
            city: sight.city.clone(),
            area: sight.area.clone(),
            town: sight.town.clone(),
        }
    }
}

/// 分页元信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total_count: u64,
    pub page_count: u64,
    pub current_page: u64,
}

/// 景点分页文档，即缓存中保存的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightListDocument {
    pub meta: PageMeta,
    pub objects: Vec<SightItem>,
}

impl SightListDocument {
    /// 由第一页查询结果构造文档
    ///
    /// 空结果对应 `total_count = 0` 的空文档
    pub fn from_page(page: &SightPage) -> Self {
        match page {
            SightPage::Empty => Self::empty(),
            SightPage::Page {
                items,
                total_count,
                page_count,
            } => Self {
                meta: PageMeta {
                    total_count: *total_count,
                    page_count: *page_count,
                    current_page: 1,
                },
                objects: items.iter().map(SightItem::from).collect(),
            },
        }
    }

    pub fn empty() -> Self {
        Self {
            meta: PageMeta {
                total_count: 0,
                page_count: 0,
                current_page: 1,
            },
            objects: Vec::new(),
        }
    }

    /// 文档中的景点编号，保持原有顺序
    pub fn ids(&self) -> Vec<i32> {
        self.objects.iter().map(|item| item.id).collect()
    }
}
