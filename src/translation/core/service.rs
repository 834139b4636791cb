//! 页面翻译编排器
//!
//! 收到 `translatePage` 消息后：显示进度提示，读取 `translationMode` 设置，
//! 运行对应的遍历策略，再把结果映射为成功或失败提示，延迟后移除提示。
//!
//! 片段级失败在策略内部已经被吸收；能到达这里的错误都会让本次运行以
//! `FailedFatal` 结束，这是决定运行结果的唯一位置。

use std::fmt;
use std::time::{Duration, Instant};

use markup5ever_rcdom::{Handle, RcDom};

use super::indicator::{DomIndicator, ProgressIndicator};
use super::requester::TranslationRequester;
use crate::translation::config::{constants, Messages, SettingsStore, TranslatorConfig};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::{TraversalMode, TraversalReport, TraversalStrategy};
use crate::translation::storage::CacheStats;
use crate::translation::transport::{HostMessage, TranslationTransport};

/// 一次页面翻译的状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    /// 携带展示给用户的原因
    FailedFatal(String),
}

impl RunState {
    pub fn is_failed(&self) -> bool {
        matches!(self, RunState::FailedFatal(_))
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::InProgress => write!(f, "in progress"),
            RunState::Succeeded => write!(f, "succeeded"),
            RunState::FailedFatal(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// 终态：`Succeeded` 或 `FailedFatal`
    pub state: RunState,
    /// 读取设置失败时为 `None`
    pub mode: Option<TraversalMode>,
    /// 只有正常完成时才有
    pub report: Option<TraversalReport>,
    pub remote_calls: usize,
    pub cache: CacheStats,
    pub elapsed: Duration,
}

/// 页面翻译编排器
pub struct PageTranslator<T, S> {
    transport: T,
    settings: S,
    config: TranslatorConfig,
    state: RunState,
}

impl<T, S> PageTranslator<T, S>
where
    T: TranslationTransport,
    S: SettingsStore,
{
    pub fn new(transport: T, settings: S, config: TranslatorConfig) -> Self {
        Self {
            transport,
            settings,
            config,
            state: RunState::Idle,
        }
    }

    /// 当前状态；提示移除后回到 `Idle`
    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 处理宿主消息；只有 `translatePage` 会触发页面翻译
    pub async fn handle_message(&mut self, message: &HostMessage, dom: &RcDom) -> Option<RunOutcome> {
        match message {
            HostMessage::TranslatePage => Some(self.translate_page(dom).await),
            HostMessage::TranslateText { .. } => {
                tracing::trace!("忽略页面侧不处理的消息: {:?}", message);
                None
            }
        }
    }

    /// 翻译整个页面，进度提示渲染在文档中
    pub async fn translate_page(&mut self, dom: &RcDom) -> RunOutcome {
        let mut indicator = DomIndicator::new(dom);
        self.translate_page_with(&dom.document, &mut indicator).await
    }

    /// 使用指定的进度提示翻译页面
    pub async fn translate_page_with(
        &mut self,
        document: &Handle,
        indicator: &mut dyn ProgressIndicator,
    ) -> RunOutcome {
        let started = Instant::now();
        self.state = RunState::InProgress;
        indicator.show_progress();

        let (mode, result, remote_calls, cache) = {
            // 每次运行使用新的请求器，缓存不会跨运行保留
            let mut requester =
                TranslationRequester::new(&self.transport, self.config.messages.clone());

            let mode = read_mode(&self.settings).await;
            let result = match &mode {
                Ok(mode) => {
                    tracing::info!("开始翻译页面，模式: {}", mode);
                    mode.run(document, &mut requester).await
                }
                Err(error) => Err(error.clone()),
            };

            (mode, result, requester.remote_calls(), requester.cache_stats())
        };

        let (state, report, delay) = match result {
            Ok(report) => {
                tracing::info!("页面翻译完成: {}，远端调用 {} 次", report, remote_calls);
                indicator.show_success();
                (
                    RunState::Succeeded,
                    Some(report),
                    self.config.success_dismiss_delay(),
                )
            }
            Err(error) => {
                let reason = fatal_reason(&error, &self.config.messages);
                tracing::error!("页面翻译失败: {}", error);
                indicator.show_error(&reason);
                (
                    RunState::FailedFatal(reason),
                    None,
                    self.config.error_dismiss_delay(),
                )
            }
        };

        self.state = state.clone();
        tokio::time::sleep(delay).await;
        indicator.dismiss();
        self.state = RunState::Idle;

        RunOutcome {
            state,
            mode: mode.ok(),
            report,
            remote_calls,
            cache,
            elapsed: started.elapsed(),
        }
    }
}

/// 读取遍历模式设置
async fn read_mode<S: SettingsStore + ?Sized>(settings: &S) -> TranslationResult<TraversalMode> {
    let value = settings.get(constants::SETTING_TRANSLATION_MODE).await?;
    Ok(TraversalMode::from_value(value.as_ref()))
}

/// 展示给用户的失败原因，没有详情时使用通用提示
fn fatal_reason(error: &TranslationError, messages: &Messages) -> String {
    let detail = error.detail().trim();
    if detail.is_empty() {
        messages.translation_failed.clone()
    } else {
        detail.to_string()
    }
}
