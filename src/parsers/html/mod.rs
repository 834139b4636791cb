//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作（解析、属性、class 列表、文本节点）
//! - `metadata`: 文档元数据处理（字符集、标题）
//! - `serializer`: 序列化功能

pub mod dom;
pub mod metadata;
pub mod serializer;

pub use dom::{
    add_class, find_elements_by_names, find_nodes, find_text_nodes, get_body,
    get_child_node_by_name, get_node_attr, get_node_name, get_parent_element, get_parent_node,
    get_text, has_class, html_to_dom, is_text_node, set_node_attr, set_text, text_content,
};
pub use metadata::{get_charset, get_title, set_charset};
pub use serializer::serialize_document;
