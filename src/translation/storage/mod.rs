//! 存储层
//!
//! 运行期内的翻译缓存

pub mod cache;

pub use cache::{CacheStats, TranslationCache};
