//! # 解析器模块
//!
//! 页面翻译只需要 HTML：解析为 DOM、在 DOM 上读写文本与标记、再序列化回字节。

pub mod html;

// Re-export commonly used items for convenience
pub use html::{get_charset, get_title, html_to_dom, serialize_document, set_charset};
