//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 后台批量操作：标记有效 / 标记无效

use super::{AdminSite, ModelKind};
use crate::error::{AdminError, Result};
use crate::model::{comment, ticket};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};

/// 批量操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    SetValid,
    SetInvalid,
}

impl BulkAction {
    pub fn name(self) -> &'static str {
        match self {
            BulkAction::SetValid => "set_valid",
            BulkAction::SetInvalid => "set_invalid",
        }
    }

    /// 后台展示的操作名称
    pub fn description(self) -> &'static str {
        match self {
            BulkAction::SetValid => "标记为有效",
            BulkAction::SetInvalid => "标记为无效",
        }
    }

    /// 操作写入的 `is_valid` 值
    pub fn target_value(self) -> bool {
        matches!(self, BulkAction::SetValid)
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BulkAction {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "set_valid" => Ok(BulkAction::SetValid),
            "set_invalid" => Ok(BulkAction::SetInvalid),
            other => Err(AdminError::NotSupported(format!("action '{}'", other))),
        }
    }
}

/// 对选中的记录执行批量操作，返回受影响行数
///
/// 操作必须已在模型后台中注册。景点的批量操作会影响首页缓存，
/// 只能通过 [`super::SightAdmin::apply_action`] 执行，这里返回 `NotSupported`。
#[instrument(skip(db, site), level = "info")]
pub async fn apply<C: ConnectionTrait>(
    db: &C,
    site: &AdminSite,
    model: ModelKind,
    action: BulkAction,
    ids: &[i32],
) -> Result<u64> {
    if model == ModelKind::Sight {
        return Err(AdminError::NotSupported(
            "sight validity changes must go through SightAdmin::apply_action".to_string(),
        ));
    }

    let admin = site.get(model)?;
    if !admin.allows(action) {
        return Err(AdminError::NotSupported(format!(
            "action '{}' is not registered for model '{}'",
            action, model
        )));
    }

    if ids.is_empty() {
        return Ok(0);
    }

    let valid = action.target_value();
    let selected = ids.iter().copied();
    let rows = match model {
        ModelKind::Comment => {
            comment::Entity::update_many()
                .col_expr(comment::Column::IsValid, Expr::value(valid))
                .filter(comment::Column::Id.is_in(selected))
                .exec(db)
                .await?
                .rows_affected
        }
        ModelKind::Ticket => {
            ticket::Entity::update_many()
                .col_expr(ticket::Column::IsValid, Expr::value(valid))
                .filter(ticket::Column::Id.is_in(selected))
                .exec(db)
                .await?
                .rows_affected
        }
        ModelKind::Sight | ModelKind::Info => {
            return Err(AdminError::NotSupported(format!(
                "model '{}' has no bulk validity update",
                model
            )))
        }
    };

    info!("{} applied to {} {} rows", action, rows, model);
    Ok(rows)
}
