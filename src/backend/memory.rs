//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了进程内缓存存储，基于 Moka。

use super::CacheStore;
use crate::error::Result;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// 进程内缓存存储
///
/// 开发与测试环境使用，每个条目记录自己的过期时刻
#[derive(Clone)]
pub struct MemoryStore {
    // 值: (数据, 过期时间)
    cache: Cache<String, (String, Option<Instant>)>,
}

impl MemoryStore {
    /// 创建新的进程内缓存
    ///
    /// # 参数
    ///
    /// * `capacity` - 最大条目数
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// 剩余生存时间，不存在、已过期或永不过期时返回 None
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let (_, expire_at) = self.cache.get(key).await?;
        expire_at.and_then(|at| at.checked_duration_since(Instant::now()))
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    #[instrument(skip(self, value), level = "debug", fields(value_len = value.len()))]
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        let expire_at = if ttl_secs > 0 {
            Some(Instant::now() + Duration::from_secs(ttl_secs))
        } else {
            None
        };
        self.cache.insert(key.to_string(), (value, expire_at)).await;
        debug!("memory set: key={}, ttl={}", key, ttl_secs);
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.cache.get(key).await {
            Some((_, Some(expire_at))) if Instant::now() >= expire_at => {
                self.cache.remove(key).await;
                debug!("memory get: key={}, expired=true, removed", key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value)),
            None => {
                debug!("memory get: key={}, found=false", key);
                Ok(None)
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, key: &str) -> Result<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
