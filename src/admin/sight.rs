//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 景点后台：保存与删除之后刷新首页缓存

use super::{BulkAction, ModelAdmin};
use crate::error::{AdminError, Result};
use crate::model::Sight;
use crate::repository::{Paged, SightFilter, SightForm, SightRepository};
use crate::sync::CacheSynchronizer;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// 景点后台
///
/// 持久化成功之后才刷新缓存；缓存刷新失败不影响操作结果
pub struct SightAdmin {
    descriptor: ModelAdmin,
    repository: Arc<dyn SightRepository>,
    synchronizer: Arc<CacheSynchronizer>,
}

impl SightAdmin {
    pub fn new(
        repository: Arc<dyn SightRepository>,
        synchronizer: Arc<CacheSynchronizer>,
    ) -> Self {
        Self {
            descriptor: ModelAdmin::sight(),
            repository,
            synchronizer,
        }
    }

    pub fn descriptor(&self) -> &ModelAdmin {
        &self.descriptor
    }

    /// 新增或修改景点
    ///
    /// `form.id` 为空时新增，否则修改
    #[instrument(skip(self, form), level = "info", fields(id = ?form.id, name = %form.name))]
    pub async fn save(&self, form: &SightForm) -> Result<Sight> {
        let sight = match form.id {
            None => self.repository.insert(form).await?,
            Some(id) => self.repository.update(id, form).await?,
        };
        info!("saved sight id={}", sight.id);

        let outcomes = self.synchronizer.on_saved().await;
        debug!("post-save cache refresh: {:?}", outcomes);
        Ok(sight)
    }

    /// 删除景点，返回是否有记录被删除
    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Ok(false);
        }
        info!("deleted sight id={}", id);

        let outcomes = self.synchronizer.on_deleted().await;
        debug!("post-delete cache refresh: {:?}", outcomes);
        Ok(true)
    }

    /// 批量标记有效/无效，之后刷新首页缓存
    #[instrument(skip(self), level = "info")]
    pub async fn apply_action(&self, action: BulkAction, ids: &[i32]) -> Result<u64> {
        if !self.descriptor.allows(action) {
            return Err(AdminError::NotSupported(format!(
                "action '{}' is not registered for sights",
                action
            )));
        }

        let rows = self
            .repository
            .set_valid(ids, action.target_value())
            .await?;
        if rows > 0 {
            self.synchronizer.on_saved().await;
        }
        Ok(rows)
    }

    /// 后台列表页
    pub async fn changelist(
        &self,
        query: Option<&str>,
        filter: SightFilter,
        page: u64,
    ) -> Result<Paged<Sight>> {
        self.repository
            .search(query, filter, page, self.descriptor.list_per_page)
            .await
    }
}
