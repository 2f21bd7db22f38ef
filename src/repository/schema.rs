//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块负责数据库连接与建表。

use crate::config::DatabaseConfig;
use crate::error::{AdminError, Result};
use crate::model::{comment, info as sight_info, sight, ticket};
use crate::utils::redaction::redact_connection_string;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// 是否为 SQLite 内存数据库
///
/// 内存库的每个连接都是独立的数据库，连接池只能保留一个连接
pub fn is_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite") && url.contains(":memory:")
}

/// 根据配置建立数据库连接
#[instrument(skip(config), level = "info", name = "connect_database")]
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let url = config.url.expose_secret();
    let max_connections = if is_memory_sqlite(url) {
        1
    } else {
        config.max_connections
    };

    let mut opt = ConnectOptions::new(url.to_string());
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    info!(
        "Connecting to database {} (max_connections={})",
        redact_connection_string(url),
        max_connections
    );

    Database::connect(opt).await.map_err(|e| {
        AdminError::Configuration(format!(
            "Failed to open database {}: {}",
            redact_connection_string(url),
            e
        ))
    })
}

/// 创建景点、详情、评论与门票表（已存在则跳过）
///
/// 外键依赖景点表，所以景点表最先创建
#[instrument(skip(db), level = "info")]
pub async fn migrate<C: ConnectionTrait>(db: &C) -> Result<()> {
    create_table(db, sight::Entity).await?;
    create_table(db, sight_info::Entity).await?;
    create_table(db, comment::Entity).await?;
    create_table(db, ticket::Entity).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let table = entity.table_name().to_string();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    debug!("Creating table {}", table);
    db.execute(backend.build(&statement)).await?;
    Ok(())
}
