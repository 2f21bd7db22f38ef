//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存刷新的指标收集。

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// 刷新结果类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshResult {
    Written,
    Empty,
    Failed,
}

impl RefreshResult {
    pub fn as_str(self) -> &'static str {
        match self {
            RefreshResult::Written => "written",
            RefreshResult::Empty => "empty",
            RefreshResult::Failed => "failed",
        }
    }
}

/// 单个缓存键的刷新统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyStats {
    pub written: u64,
    pub empty: u64,
    pub failed: u64,
    /// 最近一次刷新耗时（秒）
    pub last_duration_secs: f64,
}

impl KeyStats {
    pub fn total(&self) -> u64 {
        self.written + self.empty + self.failed
    }
}

/// 缓存同步指标
///
/// 由同步器持有，按缓存键统计刷新结果
#[derive(Debug, Default)]
pub struct SyncMetrics {
    per_key: Mutex<HashMap<String, KeyStats>>,
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, KeyStats>> {
        self.per_key.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 记录一次刷新
    pub fn record(&self, key: &str, result: RefreshResult, elapsed: Duration) {
        let mut map = self.lock();
        let stats = map.entry(key.to_string()).or_default();
        match result {
            RefreshResult::Written => stats.written += 1,
            RefreshResult::Empty => stats.empty += 1,
            RefreshResult::Failed => stats.failed += 1,
        }
        stats.last_duration_secs = elapsed.as_secs_f64();
    }

    /// 获取某个缓存键的统计
    pub fn get(&self, key: &str) -> KeyStats {
        self.lock().get(key).cloned().unwrap_or_default()
    }

    /// 按键名排序的全部统计
    pub fn snapshot(&self) -> Vec<(String, KeyStats)> {
        let mut entries: Vec<(String, KeyStats)> = self
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// 以 Prometheus 文本格式导出
    pub fn to_prometheus(&self) -> String {
        let mut output = String::new();
        output.push_str("# HELP sightadmin_cache_refresh_total Index cache refreshes by outcome\n");
        output.push_str("# TYPE sightadmin_cache_refresh_total counter\n");
        for (key, stats) in self.snapshot() {
            for (result, count) in [
                (RefreshResult::Written, stats.written),
                (RefreshResult::Empty, stats.empty),
                (RefreshResult::Failed, stats.failed),
            ] {
                output.push_str(&format!(
                    "sightadmin_cache_refresh_total{{key=\"{}\",result=\"{}\"}} {}\n",
                    key,
                    result.as_str(),
                    count
                ));
            }
        }
        output
    }
}
