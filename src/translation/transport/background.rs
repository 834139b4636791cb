//! 宿主端传输适配器
//!
//! 从设置存储读取 `groqApiKey`，调用 [`GroqClient`]，再把结果折叠成页面侧约定的字符串：
//! 缺少密钥时返回提示文本本身，其余失败返回 `"Translation error: <详情>"`。

use async_trait::async_trait;
use serde_json::Value;

use super::{GroqClient, HostMessage, TranslationTransport};
use crate::translation::config::{constants, SettingsStore};
use crate::translation::error::{TranslationError, TranslationResult};

pub struct BackgroundTransport<S> {
    client: GroqClient,
    settings: S,
}

impl<S: SettingsStore> BackgroundTransport<S> {
    pub fn new(client: GroqClient, settings: S) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// 处理来自页面的消息；只响应 `translateText`
    pub async fn handle_message(&self, message: &HostMessage) -> Option<TranslationResult<Value>> {
        match message {
            HostMessage::TranslateText { text } => Some(self.send(text).await),
            HostMessage::TranslatePage => None,
        }
    }

    /// 把客户端结果转换为响应约定
    fn encode(result: TranslationResult<String>) -> Value {
        match result {
            Ok(translated) => Value::String(translated),
            Err(TranslationError::ApiKeyMissing(message)) => Value::String(message),
            Err(error) => Value::String(format!(
                "{} {}",
                constants::TRANSLATION_ERROR_PREFIX,
                error.detail()
            )),
        }
    }
}

#[async_trait(?Send)]
impl<S: SettingsStore> TranslationTransport for BackgroundTransport<S> {
    async fn send(&self, text: &str) -> TranslationResult<Value> {
        let api_key = self.settings.get_string(constants::SETTING_API_KEY).await?;
        let result = self.client.translate(text, api_key.as_deref()).await;
        if let Err(error) = &result {
            tracing::debug!("宿主端翻译失败: {}", error);
        }
        Ok(Self::encode(result))
    }
}
