//! 结构模式：以元素为粒度翻译

use async_trait::async_trait;
use markup5ever_rcdom::Handle;

use super::collector::{structural_candidates, TextFragment};
use super::{TraversalReport, TraversalStrategy};
use crate::parsers::html::{add_class, set_node_attr, set_text};
use crate::translation::config::constants;
use crate::translation::core::requester::TranslationRequester;
use crate::translation::error::{helpers::dom_error, TranslationResult};

pub struct StructuralStrategy;

#[async_trait(?Send)]
impl TraversalStrategy for StructuralStrategy {
    async fn run(
        &self,
        document: &Handle,
        requester: &mut TranslationRequester<'_>,
    ) -> TranslationResult<TraversalReport> {
        let candidates = structural_candidates(document);
        let mut report = TraversalReport {
            candidates: candidates.len(),
            ..TraversalReport::default()
        };

        for element in &candidates {
            // 合格性在处理时检查，前面的替换可能已经改变了它
            let fragment = match TextFragment::from_element(element) {
                Some(fragment) => fragment,
                None => {
                    report.skipped += 1;
                    continue;
                }
            };

            tracing::debug!("翻译元素: {:?}", fragment.trimmed);

            let outcome = match requester.request_translation(&fragment.trimmed).await {
                Ok(Some(translation)) => apply_translation(&fragment, &translation),
                Ok(None) => {
                    report.skipped += 1;
                    continue;
                }
                Err(error) => Err(error),
            };

            match outcome {
                Ok(()) => report.translated += 1,
                Err(error) => report.absorb(error)?,
            }
        }

        Ok(report)
    }
}

/// 保存原文、替换唯一的文本子节点并打上翻译标记
fn apply_translation(fragment: &TextFragment, translation: &str) -> TranslationResult<()> {
    let element = &fragment.node;
    let text_node = element
        .children
        .borrow()
        .first()
        .cloned()
        .ok_or_else(|| dom_error("元素已没有文本子节点"))?;

    set_node_attr(element, constants::ORIGINAL_TEXT_ATTR, Some(fragment.trimmed.clone()));
    if !set_text(&text_node, translation) {
        return Err(dom_error("元素的子节点不是文本节点"));
    }
    add_class(element, constants::TRANSLATED_CLASS);

    Ok(())
}
