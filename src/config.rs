//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了后台服务的配置结构和解析逻辑。

use crate::error::{AdminError, Result};
use crate::model::SightFlag;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;

/// 精选景点缓存键
pub const INDEX_SIGHT_TOP_KEY: &str = "index_sight_top_key";
/// 热门景点缓存键
pub const INDEX_SIGHT_HOT_KEY: &str = "index_sight_hot_key";
/// 首页景点缓存过期时间（秒）
pub const INDEX_SIGHT_TIMEOUT: u64 = 5 * 60;
/// 首页景点缓存的分页大小
pub const INDEX_PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub cache: CacheSettings,
    pub redis: RedisConfig,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

/// 缓存后端类型
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    /// Redis 分布式缓存
    #[default]
    Redis,
    /// 进程内缓存
    Memory,
}

/// 首页缓存配置
///
/// 定义两个固定缓存键、过期时间与分页大小
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CacheSettings {
    /// 缓存后端
    pub backend: CacheBackendKind,
    /// 精选景点缓存键
    pub top_key: String,
    /// 热门景点缓存键
    pub hot_key: String,
    /// 缓存过期时间（秒）
    pub ttl_secs: u64,
    /// 每页条数
    pub page_size: u64,
    /// 进程内缓存的最大条目数
    pub memory_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Redis,
            top_key: INDEX_SIGHT_TOP_KEY.to_string(),
            hot_key: INDEX_SIGHT_HOT_KEY.to_string(),
            ttl_secs: INDEX_SIGHT_TIMEOUT,
            page_size: INDEX_PAGE_SIZE,
            memory_capacity: 10_000,
        }
    }
}

impl CacheSettings {
    /// 返回标记对应的缓存键
    pub fn key_for(&self, flag: SightFlag) -> &str {
        match flag {
            SightFlag::Top => &self.top_key,
            SightFlag::Hot => &self.hot_key,
        }
    }
}

/// Redis配置
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis模式
    pub mode: RedisMode,
    /// 连接字符串
    pub connection_string: SecretString,
    /// 连接超时时间（毫秒）
    pub connection_timeout_ms: u64,
    /// 命令执行超时时间（毫秒）
    pub command_timeout_ms: u64,
    /// Redis 密码（可选）
    pub password: Option<SecretString>,
    /// 是否启用 TLS
    pub enable_tls: bool,
    /// 哨兵配置
    pub sentinel: Option<SentinelConfig>,
    /// 集群配置
    pub cluster: Option<ClusterConfig>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            mode: RedisMode::Standalone,
            connection_string: SecretString::new("redis://localhost:6379".to_string().into()),
            connection_timeout_ms: 5000,
            command_timeout_ms: 3000,
            password: None,
            enable_tls: false,
            sentinel: None,
            cluster: None,
        }
    }
}

/// Redis模式枚举
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RedisMode {
    /// 单机模式
    Standalone,
    /// 哨兵模式
    Sentinel,
    /// 集群模式
    Cluster,
}

/// 哨兵配置
#[derive(Deserialize, Clone, Debug)]
pub struct SentinelConfig {
    /// 主节点名称
    pub master_name: String,
    /// 哨兵节点列表
    pub nodes: Vec<String>,
}

/// 集群配置
#[derive(Deserialize, Clone, Debug)]
pub struct ClusterConfig {
    /// 初始节点列表
    pub nodes: Vec<String>,
}

/// 数据库配置
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库连接字符串
    pub url: SecretString,
    /// 连接池最大连接数
    pub max_connections: u32,
    /// 连接超时（秒）
    pub connect_timeout_secs: u64,
    /// 是否输出 SQL 日志
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: SecretString::new("sqlite://sightadmin.db?mode=rwc".to_string().into()),
            max_connections: 5,
            connect_timeout_secs: 30,
            sqlx_logging: false,
        }
    }
}

/// 日志配置
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TelemetryConfig {
    /// 日志过滤规则，`RUST_LOG` 优先
    pub log_filter: String,
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&raw)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(raw).map_err(|e| AdminError::Configuration(e.to_string()))?;
        config.validate().map_err(AdminError::Configuration)?;
        Ok(config)
    }

    /// 加载配置文件，文件不存在时使用默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!(
                "Config file {} not found, falling back to defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// 验证配置
    ///
    /// 检查缓存、Redis与数据库配置的取值范围
    pub fn validate(&self) -> std::result::Result<(), String> {
        let cache = &self.cache;
        if cache.ttl_secs == 0 {
            return Err("cache ttl_secs cannot be zero".to_string());
        }

        if cache.ttl_secs > 86400 * 30 {
            return Err("cache ttl_secs cannot exceed 30 days (2592000 seconds)".to_string());
        }

        if cache.page_size == 0 || cache.page_size > 1000 {
            return Err("cache page_size must be between 1 and 1000".to_string());
        }

        if cache.top_key.is_empty() || cache.hot_key.is_empty() {
            return Err("cache keys cannot be empty".to_string());
        }

        if cache.top_key == cache.hot_key {
            return Err(format!(
                "cache top_key and hot_key must differ, both are '{}'",
                cache.top_key
            ));
        }

        if cache.backend == CacheBackendKind::Memory && cache.memory_capacity == 0 {
            return Err("cache memory_capacity cannot be zero".to_string());
        }

        let redis = &self.redis;
        if !(100..=30000).contains(&redis.connection_timeout_ms) {
            return Err("redis connection_timeout_ms must be between 100 and 30000 ms".to_string());
        }

        if !(100..=60000).contains(&redis.command_timeout_ms) {
            return Err("redis command_timeout_ms must be between 100 and 60000 ms".to_string());
        }

        match redis.mode {
            RedisMode::Sentinel if redis.sentinel.is_none() => {
                return Err("redis mode 'sentinel' requires a [redis.sentinel] section".to_string());
            }
            RedisMode::Cluster if redis.cluster.is_none() => {
                return Err("redis mode 'cluster' requires a [redis.cluster] section".to_string());
            }
            _ => {}
        }

        let database = &self.database;
        if database.max_connections == 0 {
            return Err("database max_connections cannot be zero".to_string());
        }

        if database.connect_timeout_secs == 0 || database.connect_timeout_secs > 300 {
            return Err("database connect_timeout_secs must be between 1 and 300".to_string());
        }

        Ok(())
    }
}
