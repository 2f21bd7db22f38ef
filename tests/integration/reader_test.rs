//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 首页列表读取测试：缓存命中与回源数据库

use sightadmin::backend::{CacheStore, MemoryStore};
use sightadmin::model::SightFlag;
use sightadmin::repository::SeaOrmSightRepository;
use sightadmin::sync::{CacheSynchronizer, IndexReader, ReadSource};
use std::sync::Arc;

#[path = "../common/mod.rs"]
mod common;

use common::{failing_store, memory_db, memory_settings, seed_flagged, setup_logging};

async fn reader_over(
    db: &sea_orm::DatabaseConnection,
    store: Arc<dyn CacheStore>,
) -> IndexReader {
    let repository = Arc::new(SeaOrmSightRepository::new(db.clone()));
    IndexReader::new(repository, store, memory_settings())
}

#[tokio::test]
async fn test_cache_miss_falls_back_to_database_without_writing() {
    setup_logging();
    let db = memory_db().await;
    let sights = seed_flagged(&db, "hot", 3, false, true).await;
    let store = Arc::new(MemoryStore::new(100));
    let reader = reader_over(&db, store.clone()).await;

    let (doc, source) = reader.sights_with_source(SightFlag::Hot).await.unwrap();
    assert_eq!(source, ReadSource::Database);
    assert_eq!(doc.ids(), vec![sights[2].id, sights[1].id, sights[0].id]);
    assert_eq!(doc.meta.total_count, 3);

    assert!(store.get("index_sight_hot_key").await.unwrap().is_none());
}

#[tokio::test]
async fn test_cache_hit_is_served_from_cache() {
    setup_logging();
    let db = memory_db().await;
    let sights = seed_flagged(&db, "top", 2, true, false).await;
    let store = Arc::new(MemoryStore::new(100));
    let repository = Arc::new(SeaOrmSightRepository::new(db.clone()));
    let synchronizer =
        CacheSynchronizer::new(repository.clone(), store.clone(), memory_settings());
    synchronizer.refresh(SightFlag::Top).await;

    // 之后新增的景点在缓存过期前不可见
    seed_flagged(&db, "late", 1, true, false).await;

    let reader = IndexReader::new(repository, store, memory_settings());
    let (doc, source) = reader.sights_with_source(SightFlag::Top).await.unwrap();
    assert_eq!(source, ReadSource::Cache);
    assert_eq!(doc.ids(), vec![sights[1].id, sights[0].id]);
}

#[tokio::test]
async fn test_unreadable_cache_falls_back_to_database() {
    setup_logging();
    let db = memory_db().await;
    let sights = seed_flagged(&db, "top", 1, true, false).await;
    let store = Arc::new(MemoryStore::new(100));
    store
        .set("index_sight_top_key", "not json".to_string(), 60)
        .await
        .unwrap();
    let reader = reader_over(&db, store.clone()).await;

    let (doc, source) = reader.sights_with_source(SightFlag::Top).await.unwrap();
    assert_eq!(source, ReadSource::Database);
    assert_eq!(doc.ids(), vec![sights[0].id]);
}

#[tokio::test]
async fn test_failing_store_falls_back_to_database() {
    setup_logging();
    let db = memory_db().await;
    let sights = seed_flagged(&db, "hot", 1, false, true).await;
    let reader = reader_over(&db, Arc::new(failing_store())).await;

    let doc = reader.sights(SightFlag::Hot).await.unwrap();
    assert_eq!(doc.ids(), vec![sights[0].id]);
}

#[tokio::test]
async fn test_no_flagged_sights_reads_empty_document() {
    let db = memory_db().await;
    let reader = reader_over(&db, Arc::new(MemoryStore::new(100))).await;

    let doc = reader.sights(SightFlag::Top).await.unwrap();
    assert!(doc.objects.is_empty());
    assert_eq!(doc.meta.total_count, 0);
}
