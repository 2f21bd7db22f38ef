//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了首页缓存的同步与读取。

pub mod reader;
pub mod synchronizer;

pub use reader::{IndexReader, ReadSource};
pub use synchronizer::{CacheSynchronizer, RefreshOutcome};
