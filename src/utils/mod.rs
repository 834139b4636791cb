//! # 工具模块
//!
//! - `url` - URL判断与 data URL 解析

pub mod url;

// Re-export commonly used items for convenience
pub use url::{is_url_and_has_protocol, parse_data_url, Url};
