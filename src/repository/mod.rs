//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 景点持久化层
//!
//! 提供按标记过滤的稳定排序分页查询、增删改以及批量有效性更新

pub mod schema;
pub mod sight;

use crate::error::Result;
use crate::model::{Sight, SightFlag};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use schema::{connect, migrate};
pub use sight::SeaOrmSightRepository;

/// 首页缓存查询结果
///
/// 空集合是正常情况，显式区分而不是当作错误处理
#[derive(Debug, Clone, PartialEq)]
pub enum SightPage {
    /// 没有满足条件的景点，不存在第一页
    Empty,
    /// 第一页数据
    Page {
        items: Vec<Sight>,
        total_count: u64,
        page_count: u64,
    },
}

impl SightPage {
    /// 由第一页数据构造结果，没有数据时为 `Empty`
    pub fn first(items: Vec<Sight>, total_count: u64, page_count: u64) -> Self {
        if items.is_empty() {
            SightPage::Empty
        } else {
            SightPage::Page {
                items,
                total_count,
                page_count,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SightPage::Empty)
    }
}

/// 通用分页结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_count: u64,
    /// 从 1 开始的页码
    pub current_page: u64,
}

/// 后台列表过滤条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SightFilter {
    pub is_top: Option<bool>,
    pub is_hot: Option<bool>,
}

/// 景点新增/修改表单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightForm {
    /// 为空表示新增
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub main_img: String,
    #[serde(default)]
    pub banner_img: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_score")]
    pub score: i32,
    #[serde(default)]
    pub min_price: f64,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub is_top: bool,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default = "default_valid")]
    pub is_valid: bool,
}

fn default_score() -> i32 {
    5
}

fn default_valid() -> bool {
    true
}

impl SightForm {
    /// 以名称创建一个有效的、未标记的表单
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            desc: String::new(),
            main_img: String::new(),
            banner_img: String::new(),
            content: String::new(),
            score: default_score(),
            min_price: 0.0,
            province: String::new(),
            city: String::new(),
            area: None,
            town: None,
            is_top: false,
            is_hot: false,
            is_valid: default_valid(),
        }
    }

    pub fn top(mut self, is_top: bool) -> Self {
        self.is_top = is_top;
        self
    }

    pub fn hot(mut self, is_hot: bool) -> Self {
        self.is_hot = is_hot;
        self
    }

    pub fn valid(mut self, is_valid: bool) -> Self {
        self.is_valid = is_valid;
        self
    }

    pub fn with_location(
        mut self,
        province: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.province = province.into();
        self.city = city.into();
        self
    }
}

impl From<&Sight> for SightForm {
    fn from(sight: &Sight) -> Self {
        Self {
            id: Some(sight.id),
            name: sight.name.clone(),
            desc: sight.desc.clone(),
            main_img: sight.main_img.clone(),
            banner_img: sight.banner_img.clone(),
            content: sight.content.clone(),
            score: sight.score,
            min_price: sight.min_price,
            province: sight.province.clone(),
            city: sight.city.clone(),
            area: sight.area.clone(),
            town: sight.town.clone(),
            is_top: sight.is_top,
            is_hot: sight.is_hot,
            is_valid: sight.is_valid,
        }
    }
}

/// 景点仓储特征
///
/// 缓存同步器与后台管理通过该接口访问景点数据
#[async_trait]
pub trait SightRepository: Send + Sync {
    /// 查询有效且带有指定标记的景点第一页
    ///
    /// 排序：`created_at` 倒序，`id` 倒序
    async fn first_flagged_page(&self, flag: SightFlag, per_page: u64) -> Result<SightPage>;

    /// 新增景点
    async fn insert(&self, form: &SightForm) -> Result<Sight>;

    /// 修改景点，`updated_at` 自动刷新
    async fn update(&self, id: i32, form: &SightForm) -> Result<Sight>;

    /// 删除景点，返回是否有记录被删除
    async fn delete(&self, id: i32) -> Result<bool>;

    /// 按主键查询
    async fn find(&self, id: i32) -> Result<Option<Sight>>;

    /// 后台列表：按名称与描述搜索，并按标记过滤
    async fn search(
        &self,
        query: Option<&str>,
        filter: SightFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paged<Sight>>;

    /// 批量设置有效性，返回受影响行数
    async fn set_valid(&self, ids: &[i32], valid: bool) -> Result<u64>;
}
