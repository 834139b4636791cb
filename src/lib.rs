//! # Hinglish Library
//!
//! 把网页上可见的英文文本改写为 Hinglish（拉丁字母书写的印地语）的工具库。
//!
//! ## 模块组织
//!
//! - `core` - 文档级处理：载入、翻译、序列化
//! - `env` - 类型安全的环境变量
//! - `network` - 下载页面所用的 HTTP 会话
//! - `parsers` - HTML 解析与 DOM 操作
//! - `translation` - 页面翻译编排器及其组件
//! - `utils` - 工具函数和实用程序

pub mod core;
pub mod env;
pub mod network;
pub mod parsers;
pub mod translation;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use crate::parsers::*;
