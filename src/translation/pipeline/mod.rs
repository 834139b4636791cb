//! 遍历策略
//!
//! 两种可互换的模式：
//!
//! - **结构模式**：以元素为粒度，整体替换只含一个文本子节点的内容元素
//! - **文本模式**：以文本节点为粒度，逐个替换 `<body>` 下的文本节点
//!
//! 两种模式都严格顺序地发出请求，可见的替换顺序就是文档顺序。
//! 循环内只有致命错误会向上传播，其余失败记录日志后继续下一个候选。

pub mod collector;
pub mod filters;
pub mod structural;
pub mod textual;

use std::fmt;

use async_trait::async_trait;
use markup5ever_rcdom::Handle;
use serde_json::Value;

use crate::translation::config::constants;
use crate::translation::core::requester::TranslationRequester;
use crate::translation::error::{helpers::log_error, TranslationError, TranslationResult};

pub use collector::TextFragment;
pub use structural::StructuralStrategy;
pub use textual::TextualStrategy;

/// 一次遍历的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraversalReport {
    /// 候选数量（结构模式下是匹配标签的元素数，文本模式下是候选文本节点数）
    pub candidates: usize,
    /// 成功替换的片段数
    pub translated: usize,
    /// 跳过的候选（不合格或没有可应用的结果）
    pub skipped: usize,
    /// 片段级失败次数
    pub failed: usize,
}

impl fmt::Display for TraversalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "候选 {} 个，已翻译 {} 个，跳过 {} 个，失败 {} 个",
            self.candidates, self.translated, self.skipped, self.failed
        )
    }
}

impl TraversalReport {
    /// 处理循环中的一次失败：致命错误原样返回，其余计数并记录日志
    pub(crate) fn absorb(&mut self, error: TranslationError) -> TranslationResult<()> {
        if error.is_fatal() {
            return Err(error);
        }

        self.failed += 1;
        log_error(&error);
        Ok(())
    }
}

/// 遍历策略
#[async_trait(?Send)]
pub trait TraversalStrategy {
    /// 遍历文档，对每个候选调用请求器并把结果写回 DOM
    async fn run(
        &self,
        document: &Handle,
        requester: &mut TranslationRequester<'_>,
    ) -> TranslationResult<TraversalReport>;
}

/// 遍历模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    #[default]
    Structural,
    Textual,
}

impl TraversalMode {
    /// 由持久化的 `translationMode` 设置得到模式
    ///
    /// 未设置（或为空字符串）时为结构模式；`"paragraphs"` 是结构模式，其他任何值都是文本模式。
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(constants::PARAGRAPHS_MODE) => TraversalMode::Structural,
            Some(_) => TraversalMode::Textual,
        }
    }

    /// 由设置存储中的原始值得到模式
    ///
    /// `null`、`false`、`0` 与空字符串都视为未设置；其余非字符串值按文本模式处理。
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => TraversalMode::Structural,
            Some(Value::String(mode)) => Self::from_setting(Some(mode)),
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => {
                TraversalMode::Structural
            }
            Some(_) => TraversalMode::Textual,
        }
    }

    /// 对应的设置值
    pub fn as_setting(&self) -> &'static str {
        match self {
            TraversalMode::Structural => constants::PARAGRAPHS_MODE,
            TraversalMode::Textual => "text",
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalMode::Structural => write!(f, "structural"),
            TraversalMode::Textual => write!(f, "textual"),
        }
    }
}

#[async_trait(?Send)]
impl TraversalStrategy for TraversalMode {
    async fn run(
        &self,
        document: &Handle,
        requester: &mut TranslationRequester<'_>,
    ) -> TranslationResult<TraversalReport> {
        match self {
            TraversalMode::Structural => StructuralStrategy.run(document, requester).await,
            TraversalMode::Textual => TextualStrategy.run(document, requester).await,
        }
    }
}
