//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值；
//! `settings` 子模块对应浏览器扩展持久化的键值设置。

pub mod manager;
pub mod settings;

// 重新导出主要类型
pub use manager::{ConfigManager, Messages, TranslatorConfig};
pub use settings::{MemorySettingsStore, SettingsStore, TranslationSettings};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 文本过滤相关
    pub const MIN_TEXT_LENGTH: usize = 2;
    pub const MAX_TEXT_LENGTH: usize = 700;

    // DOM 标记
    pub const TRANSLATED_CLASS: &str = "hinglish-translated";
    pub const ORIGINAL_TEXT_ATTR: &str = "data-hinglish-original";

    // 结构模式下参与翻译的元素
    pub const CONTENT_TAGS: &[&str] = &[
        "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "span", "div", "blockquote",
    ];

    // 宿主消息
    pub const TRANSLATE_PAGE_ACTION: &str = "translatePage";
    pub const TRANSLATION_ACTION: &str = "translateText";
    pub const TRANSLATION_ERROR_PREFIX: &str = "Translation error:";

    // 默认提示文本
    pub const DEFAULT_API_KEY_MISSING: &str = "Please configure your API key first";
    pub const DEFAULT_TRANSLATION_FAILED: &str = "Translation failed";

    // 默认API设置
    pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
    pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_SYSTEM_PROMPT: &str = "You convert English text into natural Hinglish (Hindi written in Latin script) while keeping the meaning intact. Respond with the translated text only.";

    // 进度提示
    pub const SUCCESS_DISMISS_DELAY: Duration = Duration::from_millis(2000);
    pub const ERROR_DISMISS_DELAY: Duration = Duration::from_millis(2500);

    // 设置存储的键
    pub const SETTING_TRANSLATION_MODE: &str = "translationMode";
    pub const SETTING_API_KEY: &str = "groqApiKey";
    pub const SETTING_TRANSLATION_SETTINGS: &str = "translationSettings";
    pub const SETTING_THEME: &str = "themeMode";
    pub const PARAGRAPHS_MODE: &str = "paragraphs";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "hinglish.toml",
        ".hinglish.toml",
        "hinglish.json",
        "~/.config/hinglish/config.toml",
        "/etc/hinglish/config.toml",
    ];
}

/// 便利函数
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS
        .iter()
        .any(|path| std::path::Path::new(shellexpand::tilde(path).as_ref()).exists())
}

/// 加载翻译配置，失败时回退到默认配置
pub fn load_translator_config() -> TranslatorConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.into_config(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            TranslatorConfig::default()
        }
    }
}
