//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了Redis连接提供者接口和默认实现。

use crate::{
    config::RedisConfig,
    error::{AdminError, Result},
    utils::redaction::redact_connection_string,
};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, cluster_async::ClusterConnection, Client};
use secrecy::ExposeSecret;
use tokio::time::{timeout, Duration};

/// Redis连接提供者
///
/// 按部署模式建立连接，测试中可以替换为不依赖外部Redis的实现
#[async_trait]
pub trait RedisProvider: Send + Sync {
    async fn standalone(&self, config: &RedisConfig) -> Result<ConnectionManager>;
    async fn sentinel(&self, config: &RedisConfig) -> Result<ConnectionManager>;
    async fn cluster(&self, config: &RedisConfig) -> Result<ClusterConnection>;
}

pub struct DefaultRedisProvider;

/// 启用 TLS 时把 `redis://` 改写为 `rediss://`
pub fn effective_url(config: &RedisConfig) -> String {
    let raw = config.connection_string.expose_secret();
    if config.enable_tls && !raw.starts_with("rediss://") {
        raw.replace("redis://", "rediss://")
    } else {
        raw.to_string()
    }
}

/// 构造哨兵地址：redis+sentinel://[:password@]host:port[,host:port]/master_name
pub fn sentinel_url(config: &RedisConfig) -> Result<String> {
    let sentinel = config.sentinel.as_ref().ok_or_else(|| {
        AdminError::Configuration("Sentinel configuration is missing".to_string())
    })?;

    let nodes: Vec<&str> = sentinel
        .nodes
        .iter()
        .map(|n| {
            n.trim_start_matches("redis://")
                .trim_start_matches("redis+sentinel://")
        })
        .filter(|n| !n.is_empty())
        .collect();

    if nodes.is_empty() {
        return Err(AdminError::Configuration(
            "No sentinel nodes provided".to_string(),
        ));
    }

    let mut url = "redis+sentinel://".to_string();
    if let Some(password) = &config.password {
        url.push_str(&format!(":{}@", password.expose_secret()));
    }
    url.push_str(&nodes.join(","));
    url.push('/');
    url.push_str(&sentinel.master_name);
    Ok(url)
}

async fn connect_manager(url: &str, connection_timeout_ms: u64) -> Result<ConnectionManager> {
    let client = Client::open(url)?;
    match timeout(
        Duration::from_millis(connection_timeout_ms),
        client.get_connection_manager(),
    )
    .await
    {
        Ok(res) => Ok(res?),
        Err(_) => Err(AdminError::Timeout(format!(
            "Redis connection timed out after {}ms. Target: {}",
            connection_timeout_ms,
            redact_connection_string(url)
        ))),
    }
}

#[async_trait]
impl RedisProvider for DefaultRedisProvider {
    async fn standalone(&self, config: &RedisConfig) -> Result<ConnectionManager> {
        connect_manager(&effective_url(config), config.connection_timeout_ms).await
    }

    async fn sentinel(&self, config: &RedisConfig) -> Result<ConnectionManager> {
        tracing::info!("Initializing Sentinel client with automatic failover support");
        connect_manager(&sentinel_url(config)?, config.connection_timeout_ms).await
    }

    async fn cluster(&self, config: &RedisConfig) -> Result<ClusterConnection> {
        let cluster = config.cluster.as_ref().ok_or_else(|| {
            AdminError::Configuration("Cluster configuration is missing".to_string())
        })?;

        let mut builder = redis::cluster::ClusterClient::builder(cluster.nodes.clone());
        if let Some(password) = &config.password {
            builder = builder.password(password.expose_secret().to_string());
        }
        let client = builder.build()?;

        timeout(
            Duration::from_millis(config.connection_timeout_ms),
            client.get_async_connection(),
        )
        .await
        .map_err(|_| {
            AdminError::Timeout(format!(
                "Cluster connection timed out after {}ms",
                config.connection_timeout_ms
            ))
        })?
        .map_err(AdminError::from)
    }
}
