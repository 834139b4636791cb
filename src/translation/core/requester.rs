//! 翻译请求层
//!
//! 包装一次远端翻译调用：过滤、查缓存、发送、对响应分类。
//! 远端响应只在这里被解释一次，上层看到的要么是译文，要么是 `None`，
//! 要么是 `ApiKeyMissing` / `TranslationFailed`。

use serde_json::Value;

use crate::translation::config::{constants, Messages};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::filters::is_translatable_text;
use crate::translation::storage::{CacheStats, TranslationCache};
use crate::translation::transport::TranslationTransport;

/// 翻译请求器，每次页面翻译运行新建一个，缓存随之重置
pub struct TranslationRequester<'a> {
    transport: &'a dyn TranslationTransport,
    cache: TranslationCache,
    messages: Messages,
    remote_calls: usize,
}

impl<'a> TranslationRequester<'a> {
    pub fn new(transport: &'a dyn TranslationTransport, messages: Messages) -> Self {
        Self {
            transport,
            cache: TranslationCache::new(),
            messages,
            remote_calls: 0,
        }
    }

    /// 请求翻译
    ///
    /// 不合格的文本直接返回 `Ok(None)`，不算错误；缓存命中时不发起远端调用。
    pub async fn request_translation(&mut self, text: &str) -> TranslationResult<Option<String>> {
        let trimmed = text.trim();
        if !is_translatable_text(trimmed) {
            return Ok(None);
        }

        if let Some(cached) = self.cache.get(trimmed) {
            return Ok(Some(cached));
        }

        self.remote_calls += 1;
        let response = self.transport.send(trimmed).await.map_err(|error| {
            if error.is_fatal() {
                error
            } else {
                TranslationError::TranslationFailed(error.detail().to_string())
            }
        })?;

        self.interpret(trimmed, response)
    }

    /// 对原始响应分类
    fn interpret(&mut self, key: &str, response: Value) -> TranslationResult<Option<String>> {
        let response = match response {
            Value::String(response) => response,
            _ => return Ok(None),
        };

        if response == self.messages.api_key_missing {
            return Err(TranslationError::ApiKeyMissing(response));
        }

        if let Some(rest) = response.strip_prefix(constants::TRANSLATION_ERROR_PREFIX) {
            let detail = rest.trim();
            let detail = if detail.is_empty() {
                self.messages.translation_failed.clone()
            } else {
                detail.to_string()
            };
            return Err(TranslationError::TranslationFailed(detail));
        }

        // 空字符串没有可应用的内容；只有空白的响应照常应用，但不写缓存
        if response.is_empty() {
            return Ok(None);
        }
        if response.trim().is_empty() {
            return Ok(Some(response));
        }

        self.cache.set(key, response.clone());
        Ok(Some(response))
    }

    /// 本次运行实际发出的远端调用次数
    pub fn remote_calls(&self) -> usize {
        self.remote_calls
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;

    /// 固定响应的传输，记录收到的文本
    struct Scripted {
        response: Value,
        seen: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(response: Value) -> Self {
            Self {
                response,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TranslationTransport for Scripted {
        async fn send(&self, text: &str) -> TranslationResult<Value> {
            self.seen.borrow_mut().push(text.to_string());
            Ok(self.response.clone())
        }
    }

    struct Broken;

    #[async_trait(?Send)]
    impl TranslationTransport for Broken {
        async fn send(&self, _text: &str) -> TranslationResult<Value> {
            Err(TranslationError::NetworkError("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn test_success_is_cached_under_trimmed_key() {
        let transport = Scripted::new(json!("Namaste"));
        let mut requester = TranslationRequester::new(&transport, Messages::default());

        let first = requester.request_translation("  Hello ").await.unwrap();
        let second = requester.request_translation("Hello").await.unwrap();

        assert_eq!(first.as_deref(), Some("Namaste"));
        assert_eq!(second.as_deref(), Some("Namaste"));
        assert_eq!(*transport.seen.borrow(), vec!["Hello".to_string()]);
        assert_eq!(requester.remote_calls(), 1);
        assert_eq!(requester.cache_stats().cache_hits, 1);
    }

    #[tokio::test]
    async fn test_ineligible_text_is_not_sent() {
        let transport = Scripted::new(json!("Namaste"));
        let mut requester = TranslationRequester::new(&transport, Messages::default());

        for text in ["", " a ", "1234", "{\"a\":1}", "[1,2]"] {
            assert_eq!(requester.request_translation(text).await.unwrap(), None);
        }
        assert!(transport.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_response_is_fatal() {
        let transport = Scripted::new(json!("Please configure your API key first"));
        let mut requester = TranslationRequester::new(&transport, Messages::default());

        let error = requester.request_translation("Hello").await.unwrap_err();
        assert_eq!(
            error,
            TranslationError::ApiKeyMissing("Please configure your API key first".into())
        );
    }

    #[tokio::test]
    async fn test_error_prefix_is_stripped() {
        let transport = Scripted::new(json!("Translation error: Translation failed: rate limited"));
        let mut requester = TranslationRequester::new(&transport, Messages::default());

        let error = requester.request_translation("Hello").await.unwrap_err();
        assert_eq!(
            error,
            TranslationError::TranslationFailed("Translation failed: rate limited".into())
        );
    }

    #[tokio::test]
    async fn test_bare_error_prefix_uses_default_message() {
        let transport = Scripted::new(json!("Translation error:   "));
        let mut requester = TranslationRequester::new(&transport, Messages::default());

        let error = requester.request_translation("Hello").await.unwrap_err();
        assert_eq!(error, TranslationError::TranslationFailed("Translation failed".into()));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let transport = Scripted::new(json!("Translation error: boom"));
        let mut requester = TranslationRequester::new(&transport, Messages::default());

        assert!(requester.request_translation("Hello").await.is_err());
        assert!(requester.request_translation("Hello").await.is_err());
        assert_eq!(requester.remote_calls(), 2);
    }

    #[tokio::test]
    async fn test_non_string_and_empty_responses_mean_nothing_to_apply() {
        for response in [json!(null), json!({"text": "Namaste"}), json!(42), json!("")] {
            let transport = Scripted::new(response);
            let mut requester = TranslationRequester::new(&transport, Messages::default());
            assert_eq!(requester.request_translation("Hello").await.unwrap(), None);
            assert_eq!(requester.cache_stats().total_entries, 0);
        }
    }

    #[tokio::test]
    async fn test_blank_response_is_returned_but_not_cached() {
        let transport = Scripted::new(json!("   "));
        let mut requester = TranslationRequester::new(&transport, Messages::default());

        let first = requester.request_translation("Hello").await.unwrap();
        assert_eq!(first.as_deref(), Some("   "));
        assert_eq!(requester.cache_stats().total_entries, 0);

        requester.request_translation("Hello").await.unwrap();
        assert_eq!(requester.remote_calls(), 2);
    }

    #[tokio::test]
    async fn test_custom_missing_key_message() {
        let messages = Messages {
            api_key_missing: "Pehle API key set karo".into(),
            ..Messages::default()
        };
        let transport = Scripted::new(json!("Please configure your API key first"));
        let mut requester = TranslationRequester::new(&transport, messages);

        // 与本地提示不一致的文本只是普通译文
        let result = requester.request_translation("Hello").await.unwrap();
        assert_eq!(result.as_deref(), Some("Please configure your API key first"));
    }

    #[tokio::test]
    async fn test_transport_errors_become_fragment_failures() {
        let mut requester = TranslationRequester::new(&Broken, Messages::default());
        let error = requester.request_translation("Hello").await.unwrap_err();
        assert_eq!(error, TranslationError::TranslationFailed("connection reset".into()));
        assert!(!error.is_fatal());
    }
}
