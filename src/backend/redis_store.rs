//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基于Redis的缓存存储。

use super::redis_provider::{DefaultRedisProvider, RedisProvider};
use super::CacheStore;
use crate::config::{RedisConfig, RedisMode};
use crate::error::{AdminError, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, cluster_async::ClusterConnection, AsyncCommands};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, instrument};

/// Redis缓存存储
///
/// 单机与哨兵模式共用连接管理器，集群模式使用集群连接
#[derive(Clone)]
pub enum RedisStore {
    Standalone {
        manager: ConnectionManager,
        command_timeout_ms: u64,
    },
    Cluster {
        connection: ClusterConnection,
        command_timeout_ms: u64,
    },
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standalone { .. } => write!(f, "RedisStore::Standalone"),
            Self::Cluster { .. } => write!(f, "RedisStore::Cluster"),
        }
    }
}

impl RedisStore {
    /// 创建新的Redis缓存存储
    #[instrument(skip(config), level = "info", name = "init_redis_store")]
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        Self::new_with_provider(config, Arc::new(DefaultRedisProvider)).await
    }

    /// 使用指定的Redis提供者创建缓存存储
    #[instrument(skip(config, provider), level = "info", fields(mode = ?config.mode))]
    pub async fn new_with_provider(
        config: &RedisConfig,
        provider: Arc<dyn RedisProvider>,
    ) -> Result<Self> {
        let command_timeout_ms = config.command_timeout_ms;
        match config.mode {
            RedisMode::Standalone => Ok(RedisStore::Standalone {
                manager: provider.standalone(config).await?,
                command_timeout_ms,
            }),
            RedisMode::Sentinel => Ok(RedisStore::Standalone {
                manager: provider.sentinel(config).await?,
                command_timeout_ms,
            }),
            RedisMode::Cluster => Ok(RedisStore::Cluster {
                connection: provider.cluster(config).await?,
                command_timeout_ms,
            }),
        }
    }

    /// 获取命令超时时间（毫秒）
    pub fn command_timeout_ms(&self) -> u64 {
        match self {
            RedisStore::Standalone {
                command_timeout_ms, ..
            }
            | RedisStore::Cluster {
                command_timeout_ms, ..
            } => *command_timeout_ms,
        }
    }

    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        let timeout_ms = self.command_timeout_ms();
        match timeout(Duration::from_millis(timeout_ms), fut).await {
            Ok(res) => Ok(res?),
            Err(_) => Err(AdminError::Timeout(format!(
                "redis {} timed out after {}ms",
                op, timeout_ms
            ))),
        }
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    #[instrument(skip(self, value), level = "debug", fields(value_len = value.len()))]
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        debug!("Setting key: {} with ttl: {}", key, ttl_secs);
        match self {
            RedisStore::Standalone { manager, .. } => {
                let mut conn = manager.clone();
                if ttl_secs > 0 {
                    self.bounded("SET EX", conn.set_ex::<_, _, ()>(key, value, ttl_secs))
                        .await
                } else {
                    self.bounded("SET", conn.set::<_, _, ()>(key, value)).await
                }
            }
            RedisStore::Cluster { connection, .. } => {
                let mut conn = connection.clone();
                if ttl_secs > 0 {
                    self.bounded("SET EX", conn.set_ex::<_, _, ()>(key, value, ttl_secs))
                        .await
                } else {
                    self.bounded("SET", conn.set::<_, _, ()>(key, value)).await
                }
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            RedisStore::Standalone { manager, .. } => {
                let mut conn = manager.clone();
                self.bounded("GET", conn.get::<_, Option<String>>(key)).await
            }
            RedisStore::Cluster { connection, .. } => {
                let mut conn = connection.clone();
                self.bounded("GET", conn.get::<_, Option<String>>(key)).await
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, key: &str) -> Result<()> {
        debug!("Deleting key: {}", key);
        match self {
            RedisStore::Standalone { manager, .. } => {
                let mut conn = manager.clone();
                self.bounded("DEL", conn.del::<_, ()>(key)).await
            }
            RedisStore::Cluster { connection, .. } => {
                let mut conn = connection.clone();
                self.bounded("DEL", conn.del::<_, ()>(key)).await
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn ping(&self) -> Result<()> {
        let response: String = match self {
            RedisStore::Standalone { manager, .. } => {
                let mut conn = manager.clone();
                self.bounded("PING", async move {
                    redis::cmd("PING").query_async::<String>(&mut conn).await
                })
                .await?
            }
            RedisStore::Cluster { connection, .. } => {
                let mut conn = connection.clone();
                self.bounded("PING", async move {
                    redis::cmd("PING").query_async::<String>(&mut conn).await
                })
                .await?
            }
        };
        debug!("RedisStore ping: {}", response);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
