//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存内容查看命令的实现。

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::context::AdminContext;
use crate::model::SightFlag;
use crate::serialization::JsonSerializer;
use crate::sync::ReadSource;
use anyhow::{Context, Result};

pub async fn execute(config: Config, args: &ShowArgs) -> Result<()> {
    let context = AdminContext::init(config)
        .await
        .context("Failed to initialize admin context")?;
    let flag = SightFlag::from(args.kind);
    let key = context.config().cache.key_for(flag).to_string();

    if args.fallback {
        let (document, source) = context
            .reader()
            .sights_with_source(flag)
            .await
            .with_context(|| format!("Failed to read {} sights", flag))?;
        let origin = match source {
            ReadSource::Cache => "cache",
            ReadSource::Database => "database",
        };
        println!("# {} (from {})", key, origin);
        println!("{}", JsonSerializer::pretty().serialize(&document)?);
        return Ok(());
    }

    let cached = context
        .store()
        .get(&key)
        .await
        .with_context(|| format!("Failed to read cache key '{}'", key))?;

    match cached {
        Some(raw) => {
            // 缓存内容按原样输出，不做解码校验
            println!("{}", raw);
        }
        None => println!("{}: not cached", key),
    }

    Ok(())
}
