//! # 网络模块
//!
//! 下载待翻译页面所用的 HTTP 会话。
//!
//! # 模块组织
//!
//! - `session` - HTTP会话管理、请求处理、页面下载

pub mod session;

// Re-export commonly used items for convenience
pub use session::{RetrievedDocument, Session};
