//! 翻译系统核心模块
//!
//! - **请求层** (`requester.rs`): 过滤、缓存、发送并对远端响应分类
//! - **进度提示** (`indicator.rs`): 页面上的状态提示
//! - **编排层** (`service.rs`): 读取模式设置、运行遍历策略、决定运行结果
//!
//! ## 模块依赖关系
//!
//! ```text
//! PageTranslator (service.rs)
//!     ├── SettingsStore (config/settings.rs)
//!     ├── ProgressIndicator (indicator.rs)
//!     └── TraversalMode (pipeline/mod.rs)
//!             └── TranslationRequester (requester.rs)
//!                     ├── TranslationCache (storage/cache.rs)
//!                     └── TranslationTransport (transport/mod.rs)
//! ```

pub mod indicator;
pub mod requester;
pub mod service;

pub use indicator::{DomIndicator, IndicatorState, ProgressIndicator};
pub use requester::TranslationRequester;
pub use service::{PageTranslator, RunOutcome, RunState};
