//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块负责按配置组装数据库连接、缓存存储、同步器与后台。

use crate::admin::{AdminSite, SightAdmin};
use crate::backend::{build_store_or_degrade, CacheStore};
use crate::config::Config;
use crate::error::{AdminError, Result};
use crate::repository::{connect, migrate, schema::is_memory_sqlite, SeaOrmSightRepository};
use crate::sync::{CacheSynchronizer, IndexReader};
use sea_orm::DatabaseConnection;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{info, instrument};

/// 后台运行上下文
///
/// 同步器、读取器与景点后台共享同一个仓储和缓存存储
pub struct AdminContext {
    config: Config,
    db: DatabaseConnection,
    store: Arc<dyn CacheStore>,
    synchronizer: Arc<CacheSynchronizer>,
    sight_admin: SightAdmin,
    reader: IndexReader,
    site: AdminSite,
}

impl AdminContext {
    /// 校验配置并建立所有连接
    ///
    /// 数据库连接失败返回错误；缓存后端连接失败只降级，不影响后台操作
    ///
    /// # 参数
    ///
    /// * `config` - 系统配置
    #[instrument(skip(config), level = "info", fields(backend = ?config.cache.backend))]
    pub async fn init(config: Config) -> Result<Self> {
        config.validate().map_err(AdminError::Configuration)?;

        let db = connect(&config.database).await?;
        // 内存库每次启动都是空库
        if is_memory_sqlite(config.database.url.expose_secret()) {
            migrate(&db).await?;
        }

        let store = build_store_or_degrade(&config.cache, &config.redis).await;
        info!("Cache store '{}' ready", store.name());

        Ok(Self::with_parts(config, db, store))
    }

    /// 使用已建立的连接组装上下文
    pub fn with_parts(config: Config, db: DatabaseConnection, store: Arc<dyn CacheStore>) -> Self {
        let repository = Arc::new(SeaOrmSightRepository::new(db.clone()));
        let synchronizer = Arc::new(CacheSynchronizer::new(
            repository.clone(),
            store.clone(),
            config.cache.clone(),
        ));
        let sight_admin = SightAdmin::new(repository.clone(), synchronizer.clone());
        let reader = IndexReader::new(repository, store.clone(), config.cache.clone());

        Self {
            config,
            db,
            store,
            synchronizer,
            sight_admin,
            reader,
            site: AdminSite::with_defaults(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn synchronizer(&self) -> &Arc<CacheSynchronizer> {
        &self.synchronizer
    }

    pub fn sight_admin(&self) -> &SightAdmin {
        &self.sight_admin
    }

    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }

    pub fn site(&self) -> &AdminSite {
        &self.site
    }
}
