//! sightadmin - 景点后台与首页缓存同步
//!
//! 提供景点、详情、评论、门票四个模型的后台注册，
//! 以及景点变更后重新计算首页精选/热门列表缓存的同步器。

#![doc(html_root_url = "https://docs.rs/sightadmin/0.1.0")]

pub mod admin;
pub mod backend;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod model;
pub mod repository;
pub mod serialization;
pub mod sync;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items
pub use admin::{AdminSite, BulkAction, ModelAdmin, ModelKind, SightAdmin};
pub use backend::{CacheStore, MemoryStore, RedisStore};
pub use config::Config;
pub use context::AdminContext;
pub use error::{AdminError, Result};
pub use model::{Sight, SightFlag};
pub use repository::{SeaOrmSightRepository, SightForm, SightPage, SightRepository};
pub use serialization::SightListDocument;
pub use sync::{CacheSynchronizer, IndexReader, RefreshOutcome};

/// sightadmin 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
