//! 翻译模块
//!
//! 把页面上可见的英文文本改写为 Hinglish，采用分层架构：
//! - **pipeline**: 合格性过滤、候选收集与两种遍历策略
//! - **storage**: 运行期翻译缓存
//! - **transport**: 发送翻译请求（Groq 客户端与宿主端适配器）
//! - **core**: 请求层、进度提示与页面翻译编排器
//! - **config**: 配置与持久化设置
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use hinglish::translation::{
//!     BackgroundTransport, GroqClient, MemorySettingsStore, PageTranslator, TranslatorConfig,
//! };
//!
//! # async fn example(dom: markup5ever_rcdom::RcDom) -> Result<(), Box<dyn std::error::Error>> {
//! let config = TranslatorConfig::default();
//! let settings = MemorySettingsStore::from_json(r#"{"groqApiKey": "gsk_..."}"#)?;
//! let transport = BackgroundTransport::new(GroqClient::new(config.clone())?, settings);
//!
//! let mut translator = PageTranslator::new(transport, MemorySettingsStore::new(), config);
//! let outcome = translator.translate_page(&dom).await;
//! println!("{}", outcome.state);
//! # Ok(())
//! # }
//! ```

/// 配置管理模块 - 翻译器配置、常量与持久化设置
pub mod config;

/// 核心模块 - 请求层、进度提示与编排器
pub mod core;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 遍历管道模块 - 过滤、收集与遍历策略
pub mod pipeline;

/// 存储模块 - 运行期翻译缓存
pub mod storage;

/// 传输模块 - 翻译请求的发送端
pub mod transport;

// ============================================================================
// 公共API导出
// ============================================================================

pub use config::{
    ConfigManager, MemorySettingsStore, Messages, SettingsStore, TranslationSettings,
    TranslatorConfig,
};
pub use core::{
    DomIndicator, PageTranslator, ProgressIndicator, RunOutcome, RunState, TranslationRequester,
};
pub use error::{TranslationError, TranslationResult};
pub use pipeline::{
    filters::{is_eligible_element, is_translatable_text},
    TextFragment, TraversalMode, TraversalReport, TraversalStrategy,
};
pub use storage::{CacheStats, TranslationCache};
pub use transport::{BackgroundTransport, GroqClient, HostMessage, TranslationTransport};

use std::rc::Rc;

use markup5ever_rcdom::RcDom;

/// 用 Groq 客户端翻译一个已解析的文档
///
/// `settings` 同时提供 `translationMode` 与 `groqApiKey`：编排器与宿主端适配器共享同一个存储。
pub async fn translate_dom<S: SettingsStore>(
    dom: &RcDom,
    settings: S,
    config: TranslatorConfig,
) -> TranslationResult<RunOutcome> {
    let settings = Rc::new(settings);
    let client = GroqClient::new(config.clone())?;
    let transport = BackgroundTransport::new(client, Rc::clone(&settings));
    let mut translator = PageTranslator::new(transport, settings, config);
    Ok(translator.translate_page(dom).await)
}
