//! 文本过滤器模块
//!
//! 判断文本片段或元素是否是合法的翻译候选。这里的函数都是纯函数：
//! 不做 I/O，不缓存结果，每次调用都重新计算。

use std::sync::OnceLock;

use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;

use crate::parsers::html::{has_class, is_text_node};
use crate::translation::config::constants;

/// 纯数字文本（只认 ASCII 数字）
fn is_numeric(trimmed: &str) -> bool {
    static NUMERIC: OnceLock<Option<Regex>> = OnceLock::new();
    match NUMERIC.get_or_init(|| Regex::new(r"^[0-9]+$").ok()) {
        Some(regex) => regex.is_match(trimmed),
        None => !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()),
    }
}

/// 判断文本是否值得翻译
///
/// 长度按 Unicode 标量值计数，在去掉首尾空白之后比较：
/// 少于 2 个字符或超过 700 个字符的文本、纯数字文本、
/// 形如 `{...}` / `[...]` 的序列化字面量都会被排除。
pub fn is_translatable_text(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let trimmed = text.trim();
    let length = trimmed.chars().count();

    if length < constants::MIN_TEXT_LENGTH || length > constants::MAX_TEXT_LENGTH {
        return false;
    }

    if is_numeric(trimmed) {
        return false;
    }

    !looks_like_literal(trimmed)
}

/// 看起来像序列化的对象或数组
fn looks_like_literal(trimmed: &str) -> bool {
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// 判断元素能否做整体替换
///
/// 已带翻译标记的元素不合格；元素必须恰好有一个子节点且该子节点是文本节点，
/// 这样替换文本时不会破坏嵌套标记或混合内容。
pub fn is_eligible_element(node: &Handle) -> bool {
    if !matches!(node.data, NodeData::Element { .. }) {
        return false;
    }

    if has_class(node, constants::TRANSLATED_CLASS) {
        return false;
    }

    let children = node.children.borrow();
    children.len() == 1 && is_text_node(&children[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::{find_elements_by_names, html_to_dom};
    use markup5ever_rcdom::RcDom;

    /// 解析 HTML 并返回第一个匹配的元素；DOM 必须与元素一起保留，
    /// 否则 `RcDom` 析构时会清空所有节点的子节点
    fn first(html: &str, tag: &str) -> (RcDom, Handle) {
        let dom = html_to_dom(html.as_bytes(), "utf-8").unwrap();
        let node = find_elements_by_names(&dom.document, &[tag])
            .into_iter()
            .next()
            .unwrap();
        (dom, node)
    }

    fn eligible(html: &str, tag: &str) -> bool {
        let (_dom, node) = first(html, tag);
        is_eligible_element(&node)
    }

    #[test]
    fn test_boundary_lengths() {
        assert!(!is_translatable_text(""));
        assert!(!is_translatable_text("a"));
        assert!(!is_translatable_text("   a   "));
        assert!(is_translatable_text("ab"));
        assert!(is_translatable_text(&"a".repeat(700)));
        assert!(!is_translatable_text(&"a".repeat(701)));
    }

    #[test]
    fn test_length_counts_characters_after_trimming() {
        // 700 个双字节字符仍然在上限之内
        assert!(is_translatable_text(&"é".repeat(700)));
        assert!(is_translatable_text(&format!("  {}  ", "a".repeat(700))));
    }

    #[test]
    fn test_rejects_numbers_and_literals() {
        assert!(!is_translatable_text("123"));
        assert!(!is_translatable_text(" 2024 "));
        assert!(!is_translatable_text("{a:1}"));
        assert!(!is_translatable_text("[1,2]"));

        assert!(is_translatable_text("12.5"));
        assert!(is_translatable_text("Room 101"));
        assert!(is_translatable_text("{unbalanced"));
        assert!(is_translatable_text("[note] see below"));
    }

    #[test]
    fn test_whitespace_only_text() {
        assert!(!is_translatable_text("    "));
        assert!(!is_translatable_text("\n\t"));
    }

    #[test]
    fn test_single_text_child_is_eligible() {
        let (_dom, p) = first("<p>Hello</p>", "p");
        assert_eq!(p.children.borrow().len(), 1);
        assert!(is_eligible_element(&p));
        assert!(eligible("<li>  spaced out  </li>", "li"));
    }

    #[test]
    fn test_nested_markup_is_not_eligible() {
        assert!(!eligible("<p>Hello <b>world</b></p>", "p"));
        assert!(!eligible("<p><b>world</b></p>", "p"));
        assert!(!eligible("<p></p>", "p"));
    }

    #[test]
    fn test_marked_element_is_not_eligible() {
        assert!(eligible(r#"<p class="intro">Hello</p>"#, "p"));
        assert!(!eligible(r#"<p class="intro hinglish-translated">Hello</p>"#, "p"));
    }

    #[test]
    fn test_comment_child_is_not_text() {
        let (_dom, p) = first("<p><!-- note --></p>", "p");
        assert_eq!(p.children.borrow().len(), 1);
        assert!(!is_eligible_element(&p));
    }
}
