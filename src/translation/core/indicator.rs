//! 页面上的进度提示
//!
//! 一个固定定位的 `<div>`，三种状态：进行中、成功、失败。
//! 提示元素自身带有翻译标记，两种遍历模式都不会翻译它。

use html5ever::interface::{Attribute, QualName, TreeSink};
use html5ever::tendril::{format_tendril, StrTendril};
use html5ever::tree_builder::{create_element, NodeOrText};
use html5ever::{local_name, namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, RcDom};

use crate::parsers::html::{get_body, set_node_attr, set_text};
use crate::translation::config::constants;

pub const PROGRESS_TEXT: &str = "Translating page...";
pub const SUCCESS_TEXT: &str = "Translation complete!";

/// 提示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Progress,
    Success,
    Error,
}

impl IndicatorState {
    pub fn background_color(&self) -> &'static str {
        match self {
            IndicatorState::Progress => "#1a73e8",
            IndicatorState::Success => "#0b8043",
            IndicatorState::Error => "#d93025",
        }
    }

    /// 完整的内联样式
    pub fn style(&self) -> String {
        format!(
            "position: fixed; top: 10px; right: 10px; padding: 10px 14px; \
             background-color: {}; color: #ffffff; border-radius: 4px; \
             z-index: 2147483647; box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2); \
             font-family: Segoe UI, Arial, sans-serif; font-size: 14px;",
            self.background_color()
        )
    }
}

/// 进度提示
pub trait ProgressIndicator {
    fn show_progress(&mut self);
    fn show_success(&mut self);
    fn show_error(&mut self, message: &str);
    fn dismiss(&mut self);
}

/// 渲染在文档 `<body>` 末尾的提示
///
/// 文档没有 `<body>` 时不渲染任何东西。
pub struct DomIndicator<'a> {
    dom: &'a RcDom,
    element: Option<Handle>,
}

impl<'a> DomIndicator<'a> {
    pub fn new(dom: &'a RcDom) -> Self {
        Self { dom, element: None }
    }

    /// 当前挂在文档上的提示元素
    pub fn element(&self) -> Option<&Handle> {
        self.element.as_ref()
    }

    fn render(&mut self, state: IndicatorState, text: &str) {
        match &self.element {
            Some(element) => {
                set_node_attr(element, "style", Some(state.style()));
                let text_node = element.children.borrow().first().cloned();
                match text_node {
                    Some(node) if set_text(&node, text) => {}
                    _ => self
                        .dom
                        .append(element, NodeOrText::AppendText(StrTendril::from(text))),
                }
            }
            None => {
                let body = match get_body(&self.dom.document) {
                    Some(body) => body,
                    None => {
                        tracing::debug!("文档没有 <body>，跳过进度提示");
                        return;
                    }
                };

                let element = create_element(
                    self.dom,
                    QualName::new(None, ns!(html), local_name!("div")),
                    vec![
                        attribute("class", constants::TRANSLATED_CLASS),
                        attribute("style", &state.style()),
                    ],
                );
                self.dom
                    .append(&element, NodeOrText::AppendText(StrTendril::from(text)));
                self.dom
                    .append(&body, NodeOrText::AppendNode(element.clone()));
                self.element = Some(element);
            }
        }
    }
}

fn attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, ns!(), LocalName::from(name)),
        value: format_tendril!("{}", value),
    }
}

impl ProgressIndicator for DomIndicator<'_> {
    fn show_progress(&mut self) {
        self.render(IndicatorState::Progress, PROGRESS_TEXT);
    }

    fn show_success(&mut self) {
        self.render(IndicatorState::Success, SUCCESS_TEXT);
    }

    fn show_error(&mut self, message: &str) {
        self.render(IndicatorState::Error, message);
    }

    fn dismiss(&mut self) {
        if let Some(element) = self.element.take() {
            self.dom.remove_from_parent(&element);
        }
    }
}
