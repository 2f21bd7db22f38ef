//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 首页景点列表读取：优先读缓存，缓存缺失时回源数据库。

use crate::backend::CacheStore;
use crate::config::CacheSettings;
use crate::error::Result;
use crate::model::SightFlag;
use crate::repository::SightRepository;
use crate::serialization::{JsonSerializer, SightListDocument};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// 读取来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    Cache,
    Database,
}

/// 首页列表读取器
///
/// 只读缓存，不回写；缓存只由同步器写入
pub struct IndexReader {
    repository: Arc<dyn SightRepository>,
    store: Arc<dyn CacheStore>,
    settings: CacheSettings,
    serializer: JsonSerializer,
}

impl IndexReader {
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
        }
    }

    /// 读取首页列表
    pub async fn sights(&self, flag: SightFlag) -> Result<SightListDocument> {
        self.sights_with_source(flag).await.map(|(doc, _)| doc)
    }

    /// 读取首页列表并返回数据来源
    #[instrument(skip(self), level = "debug")]
    pub async fn sights_with_source(
        &self,
        flag: SightFlag,
    ) -> Result<(SightListDocument, ReadSource)> {
        let key = self.settings.key_for(flag);

        match self.store.get(key).await {
            Ok(Some(raw)) => match self.serializer.deserialize::<SightListDocument>(&raw) {
                Ok(document) => {
                    debug!("index cache hit: key={}", key);
                    return Ok((document, ReadSource::Cache));
                }
                Err(e) => warn!(key = %key, error = %e, "cached document is unreadable"),
            },
            Ok(None) => debug!("index cache miss: key={}", key),
            Err(e) => warn!(key = %key, error = %e, "cache read failed, querying database"),
        }

        let page = self
            .repository
            .first_flagged_page(flag, self.settings.page_size)
            .await?;
        Ok((SightListDocument::from_page(&page), ReadSource::Database))
    }
}
