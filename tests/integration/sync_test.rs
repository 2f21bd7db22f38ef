//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 首页缓存同步测试：SQLite 内存库 + 进程内缓存

use chrono::Duration;
use sightadmin::backend::{CacheStore, MemoryStore};
use sightadmin::config::CacheSettings;
use sightadmin::model::SightFlag;
use sightadmin::repository::SeaOrmSightRepository;
use sightadmin::serialization::{JsonSerializer, SightListDocument};
use sightadmin::sync::{CacheSynchronizer, RefreshOutcome};
use std::sync::Arc;

#[path = "../common/mod.rs"]
mod common;

use common::{base_time, memory_db, memory_settings, seed_flagged, seed_sight, setup_logging};

struct Harness {
    db: sea_orm::DatabaseConnection,
    store: Arc<MemoryStore>,
    synchronizer: CacheSynchronizer,
}

async fn harness_with(settings: CacheSettings) -> Harness {
    setup_logging();
    let db = memory_db().await;
    let store = Arc::new(MemoryStore::new(100));
    let repository = Arc::new(SeaOrmSightRepository::new(db.clone()));
    let synchronizer = CacheSynchronizer::new(repository, store.clone(), settings);
    Harness {
        db,
        store,
        synchronizer,
    }
}

async fn harness() -> Harness {
    harness_with(memory_settings()).await
}

async fn cached(store: &MemoryStore, key: &str) -> Option<SightListDocument> {
    let raw = store.get(key).await.unwrap()?;
    Some(JsonSerializer::new().deserialize(&raw).unwrap())
}

#[tokio::test]
async fn test_hot_refresh_caps_first_page_at_twenty() {
    let h = harness().await;
    seed_flagged(&h.db, "hot", 25, false, true).await;

    let outcome = h.synchronizer.refresh(SightFlag::Hot).await;
    assert_eq!(
        outcome,
        RefreshOutcome::Written {
            key: "index_sight_hot_key".to_string(),
            count: 20
        }
    );

    let doc = cached(&h.store, "index_sight_hot_key").await.unwrap();
    assert_eq!(doc.objects.len(), 20);
    assert_eq!(doc.meta.total_count, 25);
    assert_eq!(doc.meta.page_count, 2);
    assert_eq!(doc.meta.current_page, 1);
    assert!(cached(&h.store, "index_sight_top_key").await.is_none());
}

#[tokio::test]
async fn test_top_refresh_orders_newest_first() {
    let h = harness().await;
    let t = base_time();
    let older = seed_sight(&h.db, "older", true, false, true, t).await;
    let newest = seed_sight(&h.db, "newest", true, false, true, t + Duration::hours(2)).await;
    let middle = seed_sight(&h.db, "middle", true, false, true, t + Duration::hours(1)).await;
    // 创建时间相同时主键大的在前
    let tie = seed_sight(&h.db, "tie", true, false, true, t).await;

    let outcome = h.synchronizer.refresh(SightFlag::Top).await;
    assert!(outcome.is_written());

    let doc = cached(&h.store, "index_sight_top_key").await.unwrap();
    assert_eq!(doc.ids(), vec![newest.id, middle.id, tie.id, older.id]);
    assert_eq!(doc.objects[0].name, "newest");
    assert_eq!(doc.objects[0].province, "四川");
}

#[tokio::test]
async fn test_invalid_and_unflagged_sights_are_excluded() {
    let h = harness().await;
    let t = base_time();
    let shown = seed_sight(&h.db, "shown", true, false, true, t).await;
    seed_sight(&h.db, "hidden", true, false, false, t).await;
    seed_sight(&h.db, "plain", false, false, true, t).await;
    seed_sight(&h.db, "hot-only", false, true, true, t).await;

    h.synchronizer.refresh(SightFlag::Top).await;

    let doc = cached(&h.store, "index_sight_top_key").await.unwrap();
    assert_eq!(doc.ids(), vec![shown.id]);
    assert_eq!(doc.meta.total_count, 1);
}

#[tokio::test]
async fn test_empty_result_writes_nothing() {
    let h = harness().await;
    seed_sight(&h.db, "not-valid", true, true, false, base_time()).await;

    let outcomes = h.synchronizer.refresh_all().await;
    assert_eq!(
        outcomes,
        vec![
            RefreshOutcome::Empty {
                key: "index_sight_top_key".to_string()
            },
            RefreshOutcome::Empty {
                key: "index_sight_hot_key".to_string()
            },
        ]
    );
    assert!(h.store.get("index_sight_top_key").await.unwrap().is_none());
    assert!(h.store.get("index_sight_hot_key").await.unwrap().is_none());
}

#[tokio::test]
async fn test_written_entries_use_configured_ttl() {
    let settings = CacheSettings {
        ttl_secs: 120,
        ..memory_settings()
    };
    let h = harness_with(settings).await;
    seed_flagged(&h.db, "top", 1, true, false).await;

    h.synchronizer.refresh(SightFlag::Top).await;

    let ttl = h.store.ttl("index_sight_top_key").await.unwrap();
    assert!(ttl.as_secs() <= 120);
    assert!(ttl.as_secs() > 100);
}

#[tokio::test]
async fn test_custom_keys_and_page_size() {
    let settings = CacheSettings {
        top_key: "home:top".to_string(),
        hot_key: "home:hot".to_string(),
        page_size: 5,
        ..memory_settings()
    };
    let h = harness_with(settings).await;
    seed_flagged(&h.db, "both", 7, true, true).await;

    let outcomes = h.synchronizer.refresh_all().await;
    let keys: Vec<&str> = outcomes.iter().map(|o| o.key()).collect();
    assert_eq!(keys, vec!["home:top", "home:hot"]);

    let doc = cached(&h.store, "home:hot").await.unwrap();
    assert_eq!(doc.objects.len(), 5);
    assert_eq!(doc.meta.total_count, 7);
    assert_eq!(doc.meta.page_count, 2);
}

#[tokio::test]
async fn test_refresh_records_metrics() {
    let h = harness().await;
    seed_flagged(&h.db, "top", 2, true, false).await;

    h.synchronizer.refresh_all().await;
    h.synchronizer.refresh(SightFlag::Top).await;

    let metrics = h.synchronizer.metrics();
    let top = metrics.get("index_sight_top_key");
    assert_eq!(top.written, 2);
    assert_eq!(top.failed, 0);
    let hot = metrics.get("index_sight_hot_key");
    assert_eq!(hot.empty, 1);
    assert_eq!(hot.written, 0);

    let text = metrics.to_prometheus();
    assert!(text.contains("key=\"index_sight_top_key\""));
}
