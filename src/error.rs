//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了后台管理与缓存同步的错误类型。

use thiserror::Error;

/// 后台管理错误类型枚举
///
/// 覆盖持久化、缓存后端、序列化与配置等失败场景
#[derive(Error, Debug)]
pub enum AdminError {
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 缓存存储操作失败
    #[error("Cache operation failed: {0}")]
    Cache(String),

    /// Sea-ORM数据库错误
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Redis错误
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 操作不支持
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// 超时错误
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// 记录不存在
    #[error("Record not found: {0}")]
    NotFound(String),

    /// 模型重复注册
    #[error("Model already registered: {0}")]
    AlreadyRegistered(String),

    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Serialization(err.to_string())
    }
}

/// 操作结果类型别名
pub type Result<T> = std::result::Result<T, AdminError>;
