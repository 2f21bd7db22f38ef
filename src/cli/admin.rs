//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了后台站点命令的实现。

use crate::admin::{AdminSite, ModelAdmin};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    #[command(name = "list", about = "List registered model admins")]
    List,
}

pub async fn execute(args: &AdminArgs) -> Result<()> {
    match &args.command {
        AdminSubcommand::List => execute_list(),
    }
}

fn execute_list() -> Result<()> {
    let site = AdminSite::with_defaults();

    println!("=== Registered Model Admins ===\n");
    for admin in site.iter() {
        display_admin(admin);
        println!();
    }

    Ok(())
}

fn display_admin(admin: &ModelAdmin) {
    println!("Model:         {} ({})", admin.model, admin.verbose_name);
    println!("List Display:  {}", admin.list_display.join(", "));
    if !admin.search_fields.is_empty() {
        println!("Search Fields: {}", admin.search_fields.join(", "));
    }
    if !admin.list_filter.is_empty() {
        println!("List Filter:   {}", admin.list_filter.join(", "));
    }
    println!("Per Page:      {}", admin.list_per_page);
    if !admin.actions.is_empty() {
        let actions: Vec<String> = admin
            .actions
            .iter()
            .map(|a| format!("{} ({})", a.name(), a.description()))
            .collect();
        println!("Actions:       {}", actions.join(", "));
    }
}
