//! Groq chat-completions 客户端
//!
//! 一次 POST 往返：系统提示 + 用户文本，取第一个 choice 的内容。

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::translation::config::TranslatorConfig;
use crate::translation::error::{TranslationError, TranslationResult};

/// 聊天消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

/// 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(config: &TranslatorConfig, text: &str) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            messages: vec![
                ChatMessage::new("system", &config.system_prompt),
                ChatMessage::new("user", text),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// 从响应体中取出译文，去掉首尾空白；没有可用内容时返回 `None`
pub fn extract_content(payload: &Value) -> Option<String> {
    let response: ChatResponse = serde_json::from_value(payload.clone()).ok()?;
    let content = response
        .choices
        .into_iter()
        .next()?
        .message?
        .content?;
    let trimmed = content.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 非 2xx 响应的详情：优先 `error.message`，其次状态描述，最后是状态码
pub fn error_detail(payload: Option<&Value>, status: StatusCode) -> String {
    payload
        .and_then(|body| body.pointer("/error/message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.as_u16().to_string())
}

/// Groq 客户端
pub struct GroqClient {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl GroqClient {
    pub fn new(config: TranslatorConfig) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TranslationError::NetworkError(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// 翻译一段文本
    ///
    /// 空文本返回 `InvalidInput`，缺少密钥返回 `ApiKeyMissing`，
    /// 其余远端失败都是 `TranslationFailed`。
    pub async fn translate(&self, text: &str, api_key: Option<&str>) -> TranslationResult<String> {
        if text.trim().is_empty() {
            return Err(TranslationError::InvalidInput(
                "Nothing to translate.".to_string(),
            ));
        }

        let api_key = match api_key.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => key,
            None => {
                return Err(TranslationError::ApiKeyMissing(
                    self.config.messages.api_key_missing.clone(),
                ))
            }
        };

        let fallback = &self.config.messages.translation_failed;
        let request = ChatRequest::new(&self.config, text);

        tracing::debug!("发送翻译请求: {} 字符", text.chars().count());

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::TranslationFailed(format!("{}: {}", fallback, e)))?;

        let status = response.status();
        if !status.is_success() {
            let payload = response.json::<Value>().await.ok();
            let detail = error_detail(payload.as_ref(), status);
            tracing::warn!("翻译服务返回 {}: {}", status, detail);
            return Err(TranslationError::TranslationFailed(format!(
                "{}: {}",
                fallback, detail
            )));
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| TranslationError::TranslationFailed(format!("{}: {}", fallback, e)))?;

        extract_content(&payload).ok_or_else(|| TranslationError::TranslationFailed(fallback.clone()))
    }
}
