//! 翻译模块统一错误处理
//!
//! 请求层只在一个地方对远端响应做分类：`ApiKeyMissing` 对整次运行是致命的，
//! `TranslationFailed` 只影响当前片段，其余变体在编排器层面按“未分类异常”处理。

use std::fmt;

use thiserror::Error;

use crate::core::HinglishError;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 未配置 API 密钥，携带面向用户的提示文本
    #[error("{0}")]
    ApiKeyMissing(String),

    /// 单个片段翻译失败，携带去掉前缀后的详情
    #[error("{0}")]
    TranslationFailed(String),

    /// 遍历或修改 DOM 时出错
    #[error("DOM错误: {0}")]
    DomError(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 设置存储读写错误
    #[error("设置存储错误: {0}")]
    SettingsError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 输入验证错误
    #[error("{0}")]
    InvalidInput(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl TranslationError {
    /// 是否终止整次页面翻译
    pub fn is_fatal(&self) -> bool {
        matches!(self, TranslationError::ApiKeyMissing(_))
    }

    /// 错误携带的原始详情，不含分类前缀
    pub fn detail(&self) -> &str {
        match self {
            TranslationError::ApiKeyMissing(msg)
            | TranslationError::TranslationFailed(msg)
            | TranslationError::DomError(msg)
            | TranslationError::ConfigError(msg)
            | TranslationError::SettingsError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::SerializationError(msg) => msg,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ApiKeyMissing(_) => ErrorSeverity::Critical,
            TranslationError::TranslationFailed(_) => ErrorSeverity::Warning,
            TranslationError::DomError(_) => ErrorSeverity::Error,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::SettingsError(_) => ErrorSeverity::Error,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::SerializationError(_) => ErrorSeverity::Error,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 转换为HinglishError
impl From<TranslationError> for HinglishError {
    fn from(error: TranslationError) -> Self {
        HinglishError::new(&error.to_string())
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::SettingsError(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::SerializationError(format!("JSON序列化错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::NetworkError(format!("请求超时: {}", error))
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &TranslationError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }
    }

    /// 创建DOM错误
    pub fn dom_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::DomError(msg.to_string())
    }
}
