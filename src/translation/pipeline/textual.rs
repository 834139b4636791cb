//! 文本模式：以文本节点为粒度翻译
//!
//! 成功替换一个文本节点后给它的父元素打上翻译标记，后续遍历不会再进入该元素。
//! 标记只在收集阶段检查：同一父元素下的兄弟文本节点在本轮仍会被翻译。

use async_trait::async_trait;
use markup5ever_rcdom::Handle;

use super::collector::collect_text_fragments;
use super::{TraversalReport, TraversalStrategy};
use crate::parsers::html::{add_class, get_body, get_parent_element, set_text};
use crate::translation::config::constants;
use crate::translation::core::requester::TranslationRequester;
use crate::translation::error::{helpers::dom_error, TranslationResult};

pub struct TextualStrategy;

#[async_trait(?Send)]
impl TraversalStrategy for TextualStrategy {
    async fn run(
        &self,
        document: &Handle,
        requester: &mut TranslationRequester<'_>,
    ) -> TranslationResult<TraversalReport> {
        let body = get_body(document).ok_or_else(|| dom_error("文档没有 <body> 元素"))?;

        let fragments = collect_text_fragments(&body);
        let mut report = TraversalReport {
            candidates: fragments.len(),
            ..TraversalReport::default()
        };

        for fragment in &fragments {
            if fragment.trimmed.is_empty() {
                report.skipped += 1;
                continue;
            }

            tracing::debug!("翻译文本节点: {:?}", fragment.trimmed);

            match requester.request_translation(&fragment.raw).await {
                Ok(Some(translation)) => {
                    if set_text(&fragment.node, &translation) {
                        if let Some(parent) = get_parent_element(&fragment.node) {
                            add_class(&parent, constants::TRANSLATED_CLASS);
                        }
                        report.translated += 1;
                    } else {
                        report.absorb(dom_error("候选节点不是文本节点"))?;
                    }
                }
                Ok(None) => report.skipped += 1,
                Err(error) => report.absorb(error)?,
            }
        }

        Ok(report)
    }
}
