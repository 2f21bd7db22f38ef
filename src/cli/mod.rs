//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了CLI命令行接口。

use crate::config::Config;
use crate::model::SightFlag;
use crate::telemetry::init_tracing;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sightadmin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        default_value = "sightadmin.toml",
        help = "Path to the TOML configuration file"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(name = "refresh", about = "Recompute the index page caches")]
    Refresh(RefreshArgs),

    #[command(name = "show", about = "Print a cached index document")]
    Show(ShowArgs),

    #[command(name = "status", about = "Check cache store and database connectivity")]
    Status(StatusArgs),

    #[command(name = "init-db", about = "Create the sight tables")]
    InitDb,

    #[command(name = "admin", about = "Admin site operations")]
    Admin(AdminArgs),
}

/// 刷新范围
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RefreshKind {
    Top,
    Hot,
    #[default]
    All,
}

impl RefreshKind {
    pub fn flags(self) -> Vec<SightFlag> {
        match self {
            RefreshKind::Top => vec![SightFlag::Top],
            RefreshKind::Hot => vec![SightFlag::Hot],
            RefreshKind::All => SightFlag::ALL.to_vec(),
        }
    }
}

/// 首页列表类型
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Top,
    Hot,
}

impl From<ListKind> for SightFlag {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Top => SightFlag::Top,
            ListKind::Hot => SightFlag::Hot,
        }
    }
}

#[derive(Parser, Debug)]
pub struct RefreshArgs {
    #[arg(short, long, value_enum, default_value_t = RefreshKind::All, help = "Which cache to refresh")]
    pub kind: RefreshKind,

    #[arg(short, long, help = "Print refresh counters in Prometheus format")]
    pub metrics: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[arg(short, long, value_enum, help = "Which cached list to print")]
    pub kind: ListKind,

    #[arg(long, help = "Read from the database when the cache is empty")]
    pub fallback: bool,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    #[arg(short, long, help = "Show detailed information")]
    pub verbose: bool,
}

mod admin;
mod init_db;
mod refresh;
mod show;
mod status;

pub use admin::{AdminArgs, AdminSubcommand};

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    init_tracing(
        "sightadmin",
        &config.telemetry.log_filter,
        config.telemetry.json,
    );

    match &cli.command {
        Commands::Refresh(args) => refresh::execute(config, args).await,
        Commands::Show(args) => show::execute(config, args).await,
        Commands::Status(args) => status::execute(config, args).await,
        Commands::InitDb => init_db::execute(config).await,
        Commands::Admin(args) => admin::execute(args).await,
    }
}
