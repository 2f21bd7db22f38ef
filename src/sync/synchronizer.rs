//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 首页精选/热门景点缓存同步器
//!
//! 景点新增、修改、删除之后重新计算两份首页缓存。所有失败只记录日志，
//! 不会影响触发它的后台操作。

use crate::backend::CacheStore;
use crate::config::CacheSettings;
use crate::error::Result;
use crate::metrics::{RefreshResult, SyncMetrics};
use crate::model::SightFlag;
use crate::repository::{SightPage, SightRepository};
use crate::serialization::{JsonSerializer, SightListDocument};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// 单次刷新结果
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// 已写入缓存
    Written { key: String, count: usize },
    /// 没有满足条件的景点，未写入缓存
    Empty { key: String },
    /// 查询、序列化或缓存写入失败，未写入缓存
    Failed { key: String, reason: String },
}

impl RefreshOutcome {
    pub fn key(&self) -> &str {
        match self {
            RefreshOutcome::Written { key, .. }
            | RefreshOutcome::Empty { key }
            | RefreshOutcome::Failed { key, .. } => key,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, RefreshOutcome::Written { .. })
    }

    fn result(&self) -> RefreshResult {
        match self {
            RefreshOutcome::Written { .. } => RefreshResult::Written,
            RefreshOutcome::Empty { .. } => RefreshResult::Empty,
            RefreshOutcome::Failed { .. } => RefreshResult::Failed,
        }
    }
}

/// 缓存同步器
pub struct CacheSynchronizer {
    repository: Arc<dyn SightRepository>,
    store: Arc<dyn CacheStore>,
    settings: CacheSettings,
    serializer: JsonSerializer,
    metrics: Arc<SyncMetrics>,
}

impl CacheSynchronizer {
    pub fn new(
        repository: Arc<dyn SightRepository>,
        store: Arc<dyn CacheStore>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            repository,
            store,
            settings,
            serializer: JsonSerializer::new(),
            metrics: Arc::new(SyncMetrics::new()),
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &Arc<SyncMetrics> {
        &self.metrics
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// 刷新一份首页缓存
    ///
    /// 空结果与失败都不会写入缓存，也不会向调用方返回错误
    #[instrument(skip(self), level = "debug", fields(store = self.store.name()))]
    pub async fn refresh(&self, flag: SightFlag) -> RefreshOutcome {
        let key = self.settings.key_for(flag).to_string();
        let started = Instant::now();

        let outcome = match self.write_first_page(flag, &key).await {
            Ok(Some(count)) => {
                info!(key = %key, count, "cached {} sights", flag);
                RefreshOutcome::Written { key, count }
            }
            Ok(None) => {
                info!(key = %key, "no valid {} sights, cache not written", flag);
                RefreshOutcome::Empty { key }
            }
            Err(e) => {
                warn!(key = %key, error = %e, "failed to cache {} sights", flag);
                RefreshOutcome::Failed {
                    key,
                    reason: e.to_string(),
                }
            }
        };

        self.metrics
            .record(outcome.key(), outcome.result(), started.elapsed());
        outcome
    }

    /// 查询第一页并写入缓存，返回写入条数；空结果返回 None
    async fn write_first_page(&self, flag: SightFlag, key: &str) -> Result<Option<usize>> {
        let page = self
            .repository
            .first_flagged_page(flag, self.settings.page_size)
            .await?;

        let SightPage::Page { items, .. } = &page else {
            return Ok(None);
        };
        let count = items.len();

        let document = SightListDocument::from_page(&page);
        let payload = self.serializer.serialize(&document)?;
        self.store
            .set(key, payload, self.settings.ttl_secs)
            .await?;

        Ok(Some(count))
    }

    /// 依次刷新精选与热门缓存
    pub async fn refresh_all(&self) -> Vec<RefreshOutcome> {
        let mut outcomes = Vec::with_capacity(SightFlag::ALL.len());
        for flag in SightFlag::ALL {
            outcomes.push(self.refresh(flag).await);
        }
        outcomes
    }

    /// 景点新增或修改之后调用
    ///
    /// 不区分哪个标记发生了变化，两份缓存都重新计算
    pub async fn on_saved(&self) -> Vec<RefreshOutcome> {
        self.refresh_all().await
    }

    /// 景点删除之后调用
    pub async fn on_deleted(&self) -> Vec<RefreshOutcome> {
        self.refresh_all().await
    }
}
