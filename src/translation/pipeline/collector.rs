//! 候选片段收集
//!
//! 结构模式以元素为粒度，文本模式以文本节点为粒度。
//! 两种模式都先得到一份静态的候选列表，再按文档顺序逐个处理。

use markup5ever_rcdom::Handle;

use super::filters::{is_eligible_element, is_translatable_text};
use crate::parsers::html::{
    find_elements_by_names, find_text_nodes, get_parent_element, get_text, has_class,
    text_content,
};
use crate::translation::config::constants;

/// 一个待翻译的文本片段
#[derive(Debug, Clone)]
pub struct TextFragment {
    /// 原始文本
    pub raw: String,
    /// 去掉首尾空白后的文本
    pub trimmed: String,
    /// 片段所在的节点：结构模式下是元素，文本模式下是文本节点
    pub node: Handle,
}

impl TextFragment {
    pub fn new(raw: String, node: Handle) -> Self {
        let trimmed = raw.trim().to_string();
        Self { raw, trimmed, node }
    }

    /// 从元素构建片段；元素不合格或文本不值得翻译时返回 `None`
    pub fn from_element(element: &Handle) -> Option<Self> {
        if !is_eligible_element(element) {
            return None;
        }

        let fragment = Self::new(text_content(element), element.clone());
        if fragment.trimmed.is_empty() || !is_translatable_text(&fragment.trimmed) {
            return None;
        }

        Some(fragment)
    }
}

/// 结构模式的候选元素：文档中所有内容类标签，按文档顺序
///
/// 合格性检查留到处理每个元素时再做。
pub fn structural_candidates(document: &Handle) -> Vec<Handle> {
    find_elements_by_names(document, constants::CONTENT_TAGS)
}

/// 文本模式的候选片段
///
/// 文本节点必须有父元素且父元素未带翻译标记，文本非空并且值得翻译。
/// 父元素的标记只在这里检查一次。
pub fn collect_text_fragments(body: &Handle) -> Vec<TextFragment> {
    find_text_nodes(body)
        .into_iter()
        .filter_map(|node| {
            let parent = get_parent_element(&node)?;
            if has_class(&parent, constants::TRANSLATED_CLASS) {
                return None;
            }

            let raw = get_text(&node)?;
            if raw.is_empty() || !is_translatable_text(&raw) {
                return None;
            }

            Some(TextFragment::new(raw, node))
        })
        .collect()
}
