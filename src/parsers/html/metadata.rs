//! 文档元数据处理
//!
//! 读取与页面翻译相关的少量元数据：字符集与标题。

use html5ever::tendril::format_tendril;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::parse_content_type;

use super::dom::{find_nodes, get_node_attr, set_node_attr};

/// 获取文档声明的字符集
///
/// 支持 `<meta charset="...">` 与
/// `<meta http-equiv="content-type" content="text/html; charset=...">` 两种写法。
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, vec!["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                let (_media_type, charset, _is_base64) =
                    parse_content_type(&meta_content_type_node_attr_value);
                return Some(charset);
            }
        }
    }

    None
}

/// 将文档中声明的字符集改写为 `desired_charset`
pub fn set_charset(dom: RcDom, desired_charset: &str) -> RcDom {
    for meta_node in find_nodes(&dom.document, vec!["html", "head", "meta"]).iter() {
        if get_node_attr(meta_node, "charset").is_some() {
            set_node_attr(meta_node, "charset", Some(desired_charset.to_string()));
            return dom;
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
            && get_node_attr(meta_node, "content").is_some()
        {
            set_node_attr(
                meta_node,
                "content",
                Some(format!("text/html;charset={desired_charset}")),
            );
            return dom;
        }
    }

    if let Some(head) = find_nodes(&dom.document, vec!["html", "head"]).first() {
        use html5ever::interface::{Attribute, QualName, TreeSink};
        use html5ever::tree_builder::{create_element, NodeOrText};
        use html5ever::{namespace_url, ns, LocalName};

        let meta = create_element(
            &dom,
            QualName::new(None, ns!(), LocalName::from("meta")),
            vec![Attribute {
                name: QualName::new(None, ns!(), LocalName::from("charset")),
                value: format_tendril!("{}", desired_charset),
            }],
        );
        dom.append(head, NodeOrText::AppendNode(meta));
    }

    dom
}

/// 获取文档标题
pub fn get_title(node: &Handle) -> Option<String> {
    for title_node in find_nodes(node, vec!["html", "head", "title"]).iter() {
        for child_node in title_node.children.borrow().iter() {
            if let NodeData::Text { ref contents } = child_node.data {
                return Some(contents.borrow().to_string());
            }
        }
    }

    None
}
