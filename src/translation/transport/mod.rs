//! 翻译传输层
//!
//! 页面侧只通过 [`TranslationTransport`] 发出 `{ text }` 请求，
//! 响应是一个原始 JSON 值，其分类完全交给请求层：
//!
//! - 译文字符串
//! - 与“缺少密钥”提示逐字相同的字符串
//! - 以 `"Translation error:"` 开头的字符串
//! - 非字符串或空值，表示没有可应用的结果
//!
//! `groq` 是对接模型服务的客户端，`background` 把客户端的结果折叠成上面的字符串约定。

pub mod background;
pub mod groq;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::translation::error::TranslationResult;

pub use background::BackgroundTransport;
pub use groq::GroqClient;

/// 宿主进程与页面之间的消息，按 `action` 字段区分
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action")]
pub enum HostMessage {
    /// 翻译整个页面，无负载
    #[serde(rename = "translatePage")]
    TranslatePage,

    /// 翻译单个文本片段
    #[serde(rename = "translateText")]
    TranslateText { text: String },
}

impl HostMessage {
    pub fn translate_text(text: impl Into<String>) -> Self {
        HostMessage::TranslateText { text: text.into() }
    }
}

/// 翻译请求的发送端
///
/// 单线程、协作式调度：实现可以持有 `Rc` 等非 `Send` 的状态。
#[async_trait(?Send)]
pub trait TranslationTransport {
    /// 发送一个已去除首尾空白的文本，返回原始响应
    async fn send(&self, text: &str) -> TranslationResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let page: HostMessage = serde_json::from_str(r#"{"action":"translatePage"}"#).unwrap();
        assert_eq!(page, HostMessage::TranslatePage);

        let text = serde_json::to_value(HostMessage::translate_text("Hello")).unwrap();
        assert_eq!(
            text,
            serde_json::json!({"action": "translateText", "text": "Hello"})
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(serde_json::from_str::<HostMessage>(r#"{"action":"openPopup"}"#).is_err());
    }
}
