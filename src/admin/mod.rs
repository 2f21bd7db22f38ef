//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 后台模型注册
//!
//! 声明景点、详情、评论、门票四个模型的列表字段、搜索字段、过滤字段与批量操作

pub mod actions;
pub mod sight;

use crate::error::{AdminError, Result};
use std::fmt;
use std::str::FromStr;

pub use actions::BulkAction;
pub use sight::SightAdmin;

/// 默认每页条数
pub const DEFAULT_LIST_PER_PAGE: u64 = 100;

/// 后台管理的模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Sight,
    Info,
    Comment,
    Ticket,
}

impl ModelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Sight => "sight",
            ModelKind::Info => "info",
            ModelKind::Comment => "comment",
            ModelKind::Ticket => "ticket",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sight" => Ok(ModelKind::Sight),
            "info" => Ok(ModelKind::Info),
            "comment" => Ok(ModelKind::Comment),
            "ticket" => Ok(ModelKind::Ticket),
            other => Err(AdminError::NotFound(format!("model '{}'", other))),
        }
    }
}

/// 模型后台描述
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAdmin {
    pub model: ModelKind,
    pub verbose_name: &'static str,
    pub list_display: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
    pub list_filter: Vec<&'static str>,
    pub list_per_page: u64,
    pub actions: Vec<BulkAction>,
}

impl ModelAdmin {
    pub fn new(model: ModelKind, verbose_name: &'static str) -> Self {
        Self {
            model,
            verbose_name,
            list_display: Vec::new(),
            search_fields: Vec::new(),
            list_filter: Vec::new(),
            list_per_page: DEFAULT_LIST_PER_PAGE,
            actions: Vec::new(),
        }
    }

    pub fn list_display(mut self, fields: &[&'static str]) -> Self {
        self.list_display = fields.to_vec();
        self
    }

    pub fn search_fields(mut self, fields: &[&'static str]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    pub fn list_filter(mut self, fields: &[&'static str]) -> Self {
        self.list_filter = fields.to_vec();
        self
    }

    pub fn list_per_page(mut self, per_page: u64) -> Self {
        self.list_per_page = per_page;
        self
    }

    pub fn actions(mut self, actions: &[BulkAction]) -> Self {
        self.actions = actions.to_vec();
        self
    }

    pub fn allows(&self, action: BulkAction) -> bool {
        self.actions.contains(&action)
    }

    /// 景点基础信息
    pub fn sight() -> Self {
        Self::new(ModelKind::Sight, "景点基础信息")
            .list_display(&[
                "name",
                "desc",
                "main_img",
                "score",
                "province",
                "city",
                "area",
                "town",
                "is_valid",
                "created_at",
            ])
            .search_fields(&["name", "desc"])
            .list_filter(&["is_top", "is_hot"])
            .list_per_page(20)
            .actions(&[BulkAction::SetInvalid, BulkAction::SetValid])
    }

    /// 景点详细信息
    pub fn info() -> Self {
        Self::new(ModelKind::Info, "景点详细信息")
            .list_display(&["sight", "entry_explain", "play_way", "tips", "traffic"])
            .search_fields(&["sight__name"])
    }

    /// 评论及回复
    pub fn comment() -> Self {
        Self::new(ModelKind::Comment, "评论及回复")
            .list_display(&["user", "sight", "content", "score", "is_top", "love_count"])
            .search_fields(&["sight__name"])
            .actions(&[BulkAction::SetInvalid, BulkAction::SetValid])
    }

    /// 门票管理
    pub fn ticket() -> Self {
        Self::new(ModelKind::Ticket, "门票管理")
            .list_display(&[
                "sight",
                "name",
                "types",
                "price",
                "discount",
                "total_stock",
                "remain_stock",
                "is_valid",
            ])
            .search_fields(&["sight__name"])
            .actions(&[BulkAction::SetInvalid, BulkAction::SetValid])
    }
}

/// 后台站点，按注册顺序保存模型描述
#[derive(Debug, Clone, Default)]
pub struct AdminSite {
    registry: Vec<ModelAdmin>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册四个模型的默认站点
    pub fn with_defaults() -> Self {
        let mut site = Self::new();
        for admin in [
            ModelAdmin::sight(),
            ModelAdmin::info(),
            ModelAdmin::comment(),
            ModelAdmin::ticket(),
        ] {
            // 新站点为空，不会重复注册
            let _ = site.register(admin);
        }
        site
    }

    /// 注册模型，同一模型只能注册一次
    pub fn register(&mut self, admin: ModelAdmin) -> Result<()> {
        if self.is_registered(admin.model) {
            return Err(AdminError::AlreadyRegistered(admin.model.to_string()));
        }
        self.registry.push(admin);
        Ok(())
    }

    pub fn is_registered(&self, model: ModelKind) -> bool {
        self.registry.iter().any(|a| a.model == model)
    }

    pub fn get(&self, model: ModelKind) -> Result<&ModelAdmin> {
        self.registry
            .iter()
            .find(|a| a.model == model)
            .ok_or_else(|| AdminError::NotFound(format!("admin for model '{}'", model)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelAdmin> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
