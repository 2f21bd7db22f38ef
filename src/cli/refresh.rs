//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存刷新命令的实现。

use crate::cli::RefreshArgs;
use crate::config::Config;
use crate::context::AdminContext;
use crate::sync::RefreshOutcome;
use anyhow::{Context, Result};

pub async fn execute(config: Config, args: &RefreshArgs) -> Result<()> {
    let context = AdminContext::init(config)
        .await
        .context("Failed to initialize admin context")?;
    let synchronizer = context.synchronizer();

    println!("=== Index Cache Refresh ===\n");

    for flag in args.kind.flags() {
        let outcome = synchronizer.refresh(flag).await;
        print_outcome(&outcome);
    }

    if args.metrics {
        println!();
        print!("{}", synchronizer.metrics().to_prometheus());
    }

    Ok(())
}

fn print_outcome(outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::Written { key, count } => {
            println!("✅ {}: {} sights cached", key, count)
        }
        RefreshOutcome::Empty { key } => {
            println!("➖ {}: no matching sights, cache left untouched", key)
        }
        RefreshOutcome::Failed { key, reason } => {
            println!("❌ {}: {}", key, reason)
        }
    }
}
