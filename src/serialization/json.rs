//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了JSON序列化器的实现。

use crate::error::{AdminError, Result};
use serde::{de::DeserializeOwned, Serialize};

/// JSON序列化器
///
/// 缓存值是 JSON 字符串，命令行展示时可以启用格式化输出
#[derive(Clone, Debug, Default)]
pub struct JsonSerializer {
    /// 是否格式化输出
    pretty: bool,
}

impl JsonSerializer {
    /// 创建新的JSON序列化器
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// 创建格式化输出的JSON序列化器
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// 序列化值为JSON字符串
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|e| AdminError::Serialization(e.to_string()))
    }

    /// 从JSON字符串反序列化值
    pub fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        serde_json::from_str(data).map_err(|e| AdminError::Serialization(e.to_string()))
    }
}
