//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存后端不可用时的降级存储。

use super::CacheStore;
use crate::error::{AdminError, Result};
use async_trait::async_trait;

/// 降级存储
///
/// 启动时缓存后端连接失败，用它代替真实存储。所有操作返回
/// [`AdminError::Cache`]，刷新记为失败，后台的增删改不受影响。
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn error(&self, op: &str) -> AdminError {
        AdminError::Cache(format!("{} skipped, store unavailable: {}", op, self.reason))
    }
}

#[async_trait]
impl CacheStore for UnavailableStore {
    async fn set(&self, _key: &str, _value: String, _ttl_secs: u64) -> Result<()> {
        Err(self.error("SET"))
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(self.error("GET"))
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Err(self.error("DEL"))
    }

    async fn ping(&self) -> Result<()> {
        Err(self.error("PING"))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
