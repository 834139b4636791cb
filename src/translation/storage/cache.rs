//! 翻译缓存模块
//!
//! 一次页面翻译运行内的缓存：以去掉首尾空白后的原文为键，译文为值。
//! 不做淘汰，也不做同步；只由请求层在顺序遍历中访问。

use std::collections::HashMap;

/// 缓存统计信息
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub total_entries: usize,
}

impl CacheStats {
    pub fn total_requests(&self) -> u64 {
        self.cache_hits + self.cache_misses
    }

    /// 命中率，没有请求时为 0
    pub fn hit_rate(&self) -> f64 {
        match self.total_requests() {
            0 => 0.0,
            total => self.cache_hits as f64 / total as f64,
        }
    }
}

/// 翻译缓存
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<String, String>,
    stats: CacheStats,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询译文，同时记录命中/未命中
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.cache_hits += 1;
                tracing::trace!("缓存命中: {}", key);
                Some(value.clone())
            }
            None => {
                self.stats.cache_misses += 1;
                None
            }
        }
    }

    /// 写入译文；同一个键重复写入时覆盖旧值
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
        self.stats.total_entries = self.entries.len();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
