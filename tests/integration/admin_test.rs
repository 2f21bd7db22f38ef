//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 后台操作测试：保存、删除与批量操作之后的缓存刷新

use sea_orm::EntityTrait;
use sightadmin::admin::{actions, AdminSite, BulkAction, ModelKind, SightAdmin};
use sightadmin::backend::{CacheStore, MemoryStore};
use sightadmin::error::AdminError;
use sightadmin::model::{comment, ticket};
use sightadmin::repository::{SeaOrmSightRepository, SightFilter, SightForm, SightRepository};
use sightadmin::serialization::{JsonSerializer, SightListDocument};
use sightadmin::sync::CacheSynchronizer;
use std::sync::Arc;

#[path = "../common/mod.rs"]
mod common;

use common::{
    base_time, failing_store, memory_db, memory_settings, seed_comment, seed_flagged, seed_sight,
    seed_ticket, setup_logging,
};

async fn sight_admin_with(
    db: &sea_orm::DatabaseConnection,
    store: Arc<dyn CacheStore>,
) -> SightAdmin {
    let repository = Arc::new(SeaOrmSightRepository::new(db.clone()));
    let synchronizer = Arc::new(CacheSynchronizer::new(
        repository.clone(),
        store,
        memory_settings(),
    ));
    SightAdmin::new(repository, synchronizer)
}

async fn top_ids(store: &MemoryStore) -> Option<Vec<i32>> {
    let raw = store.get("index_sight_top_key").await.unwrap()?;
    let doc: SightListDocument = JsonSerializer::new().deserialize(&raw).unwrap();
    Some(doc.ids())
}

#[tokio::test]
async fn test_created_top_sight_appears_then_disappears_after_delete() {
    setup_logging();
    let db = memory_db().await;
    let store = Arc::new(MemoryStore::new(100));
    let admin = sight_admin_with(&db, store.clone()).await;

    let keep = admin
        .save(&SightForm::new("峨眉山").top(true).with_location("四川", "乐山"))
        .await
        .unwrap();
    let created = admin
        .save(&SightForm::new("都江堰").top(true))
        .await
        .unwrap();
    assert_eq!(top_ids(&store).await.unwrap(), vec![created.id, keep.id]);

    assert!(admin.delete(created.id).await.unwrap());
    assert_eq!(top_ids(&store).await.unwrap(), vec![keep.id]);
}

#[tokio::test]
async fn test_deleting_last_top_sight_leaves_stale_entry() {
    setup_logging();
    let db = memory_db().await;
    let store = Arc::new(MemoryStore::new(100));
    let admin = sight_admin_with(&db, store.clone()).await;

    let only = admin.save(&SightForm::new("青城山").top(true)).await.unwrap();
    assert_eq!(top_ids(&store).await.unwrap(), vec![only.id]);

    // 空结果不写缓存，旧内容保留到过期
    assert!(admin.delete(only.id).await.unwrap());
    assert_eq!(top_ids(&store).await.unwrap(), vec![only.id]);
}

#[tokio::test]
async fn test_update_moves_sight_between_lists() {
    setup_logging();
    let db = memory_db().await;
    let store = Arc::new(MemoryStore::new(100));
    let admin = sight_admin_with(&db, store.clone()).await;

    let anchor = admin.save(&SightForm::new("宽窄巷子").hot(true)).await.unwrap();
    let sight = admin.save(&SightForm::new("武侯祠").top(true)).await.unwrap();

    let mut form = SightForm::from(&sight);
    form.is_top = false;
    form.is_hot = true;
    let updated = admin.save(&form).await.unwrap();
    assert_eq!(updated.id, sight.id);
    assert!(updated.updated_at >= sight.updated_at);

    let raw = store.get("index_sight_hot_key").await.unwrap().unwrap();
    let hot: SightListDocument = JsonSerializer::new().deserialize(&raw).unwrap();
    assert_eq!(hot.ids(), vec![sight.id, anchor.id]);
}

#[tokio::test]
async fn test_save_and_delete_succeed_when_cache_writes_fail() {
    setup_logging();
    let db = memory_db().await;
    let admin = sight_admin_with(&db, Arc::new(failing_store())).await;

    let sight = admin
        .save(&SightForm::new("乐山大佛").top(true).hot(true))
        .await
        .unwrap();
    assert!(sight.id > 0);

    let repository = SeaOrmSightRepository::new(db.clone());
    assert!(repository.find(sight.id).await.unwrap().is_some());

    assert!(admin.delete(sight.id).await.unwrap());
    assert!(repository.find(sight.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_sight_returns_false() {
    setup_logging();
    let db = memory_db().await;
    let store = Arc::new(MemoryStore::new(100));
    let admin = sight_admin_with(&db, store.clone()).await;

    assert!(!admin.delete(404).await.unwrap());
    assert!(top_ids(&store).await.is_none());
}

#[tokio::test]
async fn test_update_missing_sight_is_not_found() {
    setup_logging();
    let db = memory_db().await;
    let admin = sight_admin_with(&db, Arc::new(MemoryStore::new(100))).await;

    let mut form = SightForm::new("不存在");
    form.id = Some(999);
    assert!(matches!(
        admin.save(&form).await,
        Err(AdminError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_sight_bulk_action_updates_selected_and_refreshes() {
    setup_logging();
    let db = memory_db().await;
    let store = Arc::new(MemoryStore::new(100));
    let admin = sight_admin_with(&db, store.clone()).await;
    let sights = seed_flagged(&db, "top", 3, true, false).await;

    let rows = admin
        .apply_action(BulkAction::SetInvalid, &[sights[0].id, sights[2].id])
        .await
        .unwrap();
    assert_eq!(rows, 2);
    assert_eq!(top_ids(&store).await.unwrap(), vec![sights[1].id]);

    let repository = SeaOrmSightRepository::new(db.clone());
    assert!(!repository.find(sights[0].id).await.unwrap().unwrap().is_valid);
    assert!(repository.find(sights[1].id).await.unwrap().unwrap().is_valid);

    assert_eq!(admin.apply_action(BulkAction::SetValid, &[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_comment_and_ticket_bulk_actions_touch_only_selected_rows() {
    setup_logging();
    let db = memory_db().await;
    let site = AdminSite::with_defaults();
    let sight = seed_sight(&db, "九寨沟", false, false, true, base_time()).await;

    let c1 = seed_comment(&db, sight.id, "很好").await;
    let c2 = seed_comment(&db, sight.id, "一般").await;
    let rows = actions::apply(&db, &site, ModelKind::Comment, BulkAction::SetInvalid, &[c2.id])
        .await
        .unwrap();
    assert_eq!(rows, 1);
    let c1_now = comment::Entity::find_by_id(c1.id).one(&db).await.unwrap().unwrap();
    let c2_now = comment::Entity::find_by_id(c2.id).one(&db).await.unwrap().unwrap();
    assert!(c1_now.is_valid);
    assert!(!c2_now.is_valid);

    let t1 = seed_ticket(&db, sight.id, "成人票").await;
    let t2 = seed_ticket(&db, sight.id, "儿童票").await;
    actions::apply(&db, &site, ModelKind::Ticket, BulkAction::SetInvalid, &[t1.id, t2.id])
        .await
        .unwrap();
    let rows = actions::apply(&db, &site, ModelKind::Ticket, BulkAction::SetValid, &[t1.id])
        .await
        .unwrap();
    assert_eq!(rows, 1);
    let t1_now = ticket::Entity::find_by_id(t1.id).one(&db).await.unwrap().unwrap();
    let t2_now = ticket::Entity::find_by_id(t2.id).one(&db).await.unwrap().unwrap();
    assert!(t1_now.is_valid);
    assert!(!t2_now.is_valid);
}

#[tokio::test]
async fn test_sight_validity_cannot_bypass_cache_refresh() {
    setup_logging();
    let db = memory_db().await;
    let store = Arc::new(MemoryStore::new(100));
    let admin = sight_admin_with(&db, store.clone()).await;
    let site = AdminSite::with_defaults();
    let sights = seed_flagged(&db, "top", 2, true, false).await;
    admin.apply_action(BulkAction::SetValid, &[sights[0].id]).await.unwrap();
    assert_eq!(top_ids(&store).await.unwrap(), vec![sights[1].id, sights[0].id]);

    let err = actions::apply(&db, &site, ModelKind::Sight, BulkAction::SetInvalid, &[sights[1].id])
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::NotSupported(ref m) if m.contains("apply_action")));

    let repository = SeaOrmSightRepository::new(db.clone());
    assert!(repository.find(sights[1].id).await.unwrap().unwrap().is_valid);

    admin
        .apply_action(BulkAction::SetInvalid, &[sights[1].id])
        .await
        .unwrap();
    assert_eq!(top_ids(&store).await.unwrap(), vec![sights[0].id]);
}

#[tokio::test]
async fn test_info_has_no_bulk_actions() {
    let db = memory_db().await;
    let site = AdminSite::with_defaults();

    let err = actions::apply(&db, &site, ModelKind::Info, BulkAction::SetValid, &[1])
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::NotSupported(_)));
}

#[tokio::test]
async fn test_changelist_searches_and_filters() {
    setup_logging();
    let db = memory_db().await;
    let admin = sight_admin_with(&db, Arc::new(MemoryStore::new(100))).await;
    let t = base_time();
    seed_sight(&db, "黄龙", true, false, true, t).await;
    seed_sight(&db, "黄山", false, true, true, t).await;
    seed_sight(&db, "泰山", true, true, true, t).await;

    let page = admin
        .changelist(Some("黄"), SightFilter::default(), 1)
        .await
        .unwrap();
    assert_eq!(page.total_count, 2);

    let filter = SightFilter {
        is_top: Some(true),
        is_hot: None,
    };
    let page = admin.changelist(None, filter, 1).await.unwrap();
    let names: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["泰山", "黄龙"]);
    assert_eq!(page.current_page, 1);
}

#[tokio::test]
async fn test_changelist_search_treats_wildcards_literally() {
    let db = memory_db().await;
    let admin = sight_admin_with(&db, Arc::new(MemoryStore::new(100))).await;
    let t = base_time();
    seed_sight(&db, "abc", false, false, true, t).await;
    seed_sight(&db, "xyz", false, false, true, t).await;
    let discounted = seed_sight(&db, "50%off", false, false, true, t).await;

    let page = admin
        .changelist(Some("%"), SightFilter::default(), 1)
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, discounted.id);

    let page = admin
        .changelist(Some("_"), SightFilter::default(), 1)
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);

    let page = admin
        .changelist(Some("ABC"), SightFilter::default(), 1)
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
}

#[tokio::test]
async fn test_changelist_paginates_by_list_per_page() {
    let db = memory_db().await;
    let admin = sight_admin_with(&db, Arc::new(MemoryStore::new(100))).await;
    seed_flagged(&db, "page", 25, false, false).await;

    assert_eq!(admin.descriptor().list_per_page, 20);
    let second = admin
        .changelist(None, SightFilter::default(), 2)
        .await
        .unwrap();
    assert_eq!(second.items.len(), 5);
    assert_eq!(second.page_count, 2);
    assert_eq!(second.total_count, 25);
}
