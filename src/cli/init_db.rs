//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了建表命令的实现。

use crate::config::Config;
use crate::repository::{connect, migrate};
use anyhow::{Context, Result};

pub async fn execute(config: Config) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    migrate(&db).await.context("Failed to create tables")?;

    println!("✅ Tables created: sight, sight_info, sight_comment, sight_ticket");
    Ok(())
}
