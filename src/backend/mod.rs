//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存存储接口，以及 Redis 与进程内两种实现。

pub mod memory;
pub mod redis_store;
pub mod redis_provider;
pub mod unavailable;

use crate::config::{CacheBackendKind, CacheSettings, RedisConfig};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use unavailable::UnavailableStore;

/// 缓存存储特征
///
/// 值统一为字符串（JSON 文档），过期时间单位为秒
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 写入缓存
    ///
    /// # 参数
    ///
    /// * `key` - 缓存键
    /// * `value` - 缓存值
    /// * `ttl_secs` - 过期时间（秒），0 表示不过期
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<()>;

    /// 读取缓存，不存在或已过期时返回 None
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 删除缓存项
    async fn delete(&self, key: &str) -> Result<()>;

    /// 检查后端是否可用
    async fn ping(&self) -> Result<()>;

    /// 后端名称，用于日志与状态输出
    fn name(&self) -> &'static str;
}

/// 根据配置创建缓存存储
pub async fn build_store(
    settings: &CacheSettings,
    redis: &RedisConfig,
) -> Result<Arc<dyn CacheStore>> {
    match settings.backend {
        CacheBackendKind::Redis => Ok(Arc::new(RedisStore::new(redis).await?)),
        CacheBackendKind::Memory => Ok(Arc::new(MemoryStore::new(settings.memory_capacity))),
    }
}

/// 根据配置创建缓存存储，连接失败时降级为 [`UnavailableStore`]
///
/// 后台启动不依赖缓存后端
pub async fn build_store_or_degrade(
    settings: &CacheSettings,
    redis: &RedisConfig,
) -> Arc<dyn CacheStore> {
    match build_store(settings, redis).await {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "cache store unavailable, index refreshes will fail until restart");
            Arc::new(UnavailableStore::new(e.to_string()))
        }
    }
}
