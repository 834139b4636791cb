// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use markup5ever_rcdom::{Handle, RcDom};
use serde_json::Value;

use hinglish::parsers::html::{find_elements_by_names, get_node_attr, has_class, html_to_dom, text_content};
use hinglish::translation::{
    MemorySettingsStore, PageTranslator, ProgressIndicator, TranslationResult,
    TranslationTransport, TranslatorConfig,
};

pub const API_KEY_MISSING: &str = "Please configure your API key first";

/// HTML 测试辅助
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 创建测试用的DOM结构
    pub fn create_test_dom(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8").expect("测试 HTML 应当可以解析")
    }

    /// 三个段落：普通文本、纯数字、空段落
    pub fn create_three_paragraph_page() -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>Test Page</title></head>
<body><p>Hello</p><p>1234</p><p></p></body>
</html>"#
            .to_string()
    }

    /// 文档中所有指定标签的元素
    pub fn elements(dom: &RcDom, tag: &str) -> Vec<Handle> {
        find_elements_by_names(&dom.document, &[tag])
    }

    /// 指定标签元素的文本内容
    pub fn texts(dom: &RcDom, tag: &str) -> Vec<String> {
        Self::elements(dom, tag).iter().map(text_content).collect()
    }

    pub fn is_translated(node: &Handle) -> bool {
        has_class(node, "hinglish-translated")
    }

    pub fn original_text(node: &Handle) -> Option<String> {
        get_node_attr(node, "data-hinglish-original")
    }
}

/// 脚本化的传输：按原文查表返回响应，记录每一次调用
pub struct FakeTransport {
    responses: HashMap<String, Value>,
    default_response: Value,
    calls: RefCell<Vec<String>>,
}

impl FakeTransport {
    /// 所有请求都返回同一个响应
    pub fn always(response: Value) -> Self {
        Self {
            responses: HashMap::new(),
            default_response: response,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// 表中没有的文本返回 `null`
    pub fn with_responses(responses: &[(&str, Value)]) -> Self {
        Self {
            responses: responses
                .iter()
                .map(|(text, response)| (text.to_string(), response.clone()))
                .collect(),
            default_response: Value::Null,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl TranslationTransport for FakeTransport {
    async fn send(&self, text: &str) -> TranslationResult<Value> {
        self.calls.borrow_mut().push(text.to_string());
        Ok(self
            .responses
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone()))
    }
}

/// 记录状态变化的进度提示
#[derive(Default)]
pub struct RecordingIndicator {
    pub events: Vec<String>,
}

impl ProgressIndicator for RecordingIndicator {
    fn show_progress(&mut self) {
        self.events.push("progress".to_string());
    }

    fn show_success(&mut self) {
        self.events.push("success".to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(format!("error: {message}"));
    }

    fn dismiss(&mut self) {
        self.events.push("dismiss".to_string());
    }
}

/// 以指定模式设置创建编排器
pub fn translator_with_mode(
    transport: FakeTransport,
    mode: Option<&str>,
) -> PageTranslator<FakeTransport, MemorySettingsStore> {
    let settings = match mode {
        Some(mode) => MemorySettingsStore::from_json(&format!(r#"{{"translationMode": "{mode}"}}"#))
            .expect("设置 JSON 应当合法"),
        None => MemorySettingsStore::new(),
    };
    PageTranslator::new(transport, settings, TranslatorConfig::default())
}
