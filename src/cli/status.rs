//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了服务状态查询命令的实现。

use crate::cli::StatusArgs;
use crate::config::Config;
use crate::context::AdminContext;
use crate::model::SightFlag;
use crate::serialization::{JsonSerializer, SightListDocument};
use anyhow::{Context, Result};

pub async fn execute(config: Config, args: &StatusArgs) -> Result<()> {
    let context = AdminContext::init(config)
        .await
        .context("Failed to initialize admin context")?;

    println!("=== Sight Admin Status ===\n");

    let store = context.store();
    match store.ping().await {
        Ok(()) => println!("Cache Store: ✅ {} reachable", store.name()),
        Err(e) => println!("Cache Store: ❌ {} unreachable ({})", store.name(), e),
    }

    match context.db().ping().await {
        Ok(()) => println!("Database:    ✅ reachable"),
        Err(e) => println!("Database:    ❌ unreachable ({})", e),
    }

    println!("\nIndex Caches:");
    let serializer = JsonSerializer::new();
    let settings = &context.config().cache;
    for flag in SightFlag::ALL {
        let key = settings.key_for(flag);
        let state = match store.get(key).await {
            Ok(Some(raw)) => match serializer.deserialize::<SightListDocument>(&raw) {
                Ok(doc) if args.verbose => format!(
                    "cached ({} of {} sights, ids {:?})",
                    doc.objects.len(),
                    doc.meta.total_count,
                    doc.ids()
                ),
                Ok(doc) => format!("cached ({} sights)", doc.objects.len()),
                Err(e) => format!("unreadable ({})", e),
            },
            Ok(None) => "not cached".to_string(),
            Err(e) => format!("error ({})", e),
        };
        println!("  {:<24} {}", key, state);
    }

    if args.verbose {
        println!("\nTTL:       {}s", settings.ttl_secs);
        println!("Page Size: {}", settings.page_size);
    }

    Ok(())
}
