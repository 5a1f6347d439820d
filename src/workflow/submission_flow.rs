//! 序列提交流程 - 流程层
//!
//! 核心职责：定义"一条序列"的完整处理流程
//!
//! 流程顺序：
//! 1. 清空输入框（第一条跳过）→ 写入序列 → 等待回显
//! 2. 等待预测按钮可点击 → 点击
//! 3. 等待结果段落 → 提取分数与标识符
//!
//! 页面在多条序列之间复用，上一条的结果段落可能还在；点击前记下它的文本，
//! 之后只接受文本已变化的结果。
//!
//! 任一步骤超时或交互失败都转换为 [`ItemError`]，由上层记录后继续下一条。
//! 会话本身的故障通过外层 `anyhow::Result` 向上传播。

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::{Config, Timeouts};
use crate::error::ItemError;
use crate::infrastructure::{Condition, FormSession, Locator, Outcome};
use crate::models::{PredictionResult, SequenceRecord};
use crate::services::extract::{extract_identifier, extract_score};
use crate::utils::logging::truncate_text;
use crate::workflow::item_ctx::ItemCtx;

/// 单条序列的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ClearInput,
    SetInput,
    AwaitEcho,
    LocateSubmit,
    ClickSubmit,
    AwaitResult,
    Extract,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ClearInput => "清空输入框",
            Stage::SetInput => "写入序列",
            Stage::AwaitEcho => "等待回显",
            Stage::LocateSubmit => "查找预测按钮",
            Stage::ClickSubmit => "点击预测按钮",
            Stage::AwaitResult => "等待预测结果",
            Stage::Extract => "提取分数",
        };
        f.write_str(name)
    }
}

/// 单条序列的处理结果
pub type ItemOutcome = std::result::Result<PredictionResult, ItemError>;

/// 序列提交流程
///
/// - 只描述一条序列的步骤
/// - 不持有会话，由调用方借入
/// - 不写结果文件
#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    submit_button: Locator,
    result_element: Locator,
    timeouts: Timeouts,
}

impl SubmissionFlow {
    pub fn new(config: &Config) -> Self {
        Self::with_locators(
            Locator::button_containing(&config.submit_button_text),
            Locator::paragraph_containing_any(&config.result_markers),
            config.timeouts(),
        )
    }

    pub fn with_locators(
        submit_button: Locator,
        result_element: Locator,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            submit_button,
            result_element,
            timeouts,
        }
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub async fn run<S: FormSession + ?Sized>(
        &self,
        session: &mut S,
        record: &SequenceRecord,
        ctx: &ItemCtx,
    ) -> Result<ItemOutcome> {
        let index = ctx.index;
        info!("{} 序列: {}", ctx, truncate_text(&record.residues, 60));

        if !ctx.is_first() {
            self.enter(ctx, Stage::ClearInput);
            session.clear_input().await?;
        }

        self.enter(ctx, Stage::SetInput);
        session.set_input_value(&record.residues).await?;

        self.enter(ctx, Stage::AwaitEcho);
        let echo = Condition::InputValueEquals(record.residues.clone());
        if !session.wait_until(&echo, self.timeouts.echo).await?.is_ready() {
            return Ok(Err(ItemError::EchoTimeout { index }));
        }

        self.enter(ctx, Stage::LocateSubmit);
        let button = match session
            .find_clickable(&self.submit_button, self.timeouts.submit)
            .await?
        {
            Outcome::Ready(button) => button,
            Outcome::Timeout | Outcome::InteractionError(_) => {
                return Ok(Err(ItemError::SubmitNotFound { index }));
            }
        };

        self.enter(ctx, Stage::ClickSubmit);
        let stale = self.visible_result(session).await?;
        match session.click(&button).await? {
            Outcome::Ready(()) => {}
            Outcome::InteractionError(reason) => {
                return Ok(Err(ItemError::SubmitInteractionFailed { index, reason }));
            }
            Outcome::Timeout => {
                return Ok(Err(ItemError::SubmitInteractionFailed {
                    index,
                    reason: "click timed out".to_string(),
                }));
            }
        }

        self.enter(ctx, Stage::AwaitResult);
        let fresh = match stale {
            Some(previous) => {
                debug!("{} 页面上已有结果，等待文本变化", ctx);
                Condition::TextChanged {
                    locator: self.result_element.clone(),
                    previous,
                }
            }
            None => Condition::Present(self.result_element.clone()),
        };
        let result_element = match session.wait_until(&fresh, self.timeouts.result).await? {
            Outcome::Ready(element) => element,
            Outcome::Timeout => return Ok(Err(ItemError::ResultTimeout { index })),
            Outcome::InteractionError(_) => {
                return Ok(Err(ItemError::ResultElementMissing { index }));
            }
        };

        self.enter(ctx, Stage::Extract);
        let Some(text) = session.read_text(&result_element).await? else {
            return Ok(Err(ItemError::ResultElementMissing { index }));
        };
        debug!("{} 结果文本: {}", ctx, text);

        Ok(Ok(PredictionResult {
            identifier: extract_identifier(&record.header),
            score: extract_score(&text),
        }))
    }

    /// 当前页面上结果段落的文本（不等待）
    async fn visible_result<S: FormSession + ?Sized>(
        &self,
        session: &mut S,
    ) -> Result<Option<String>> {
        let present = Condition::Present(self.result_element.clone());
        match session.wait_until(&present, Duration::ZERO).await? {
            Outcome::Ready(element) => session.read_text(&element).await,
            Outcome::Timeout | Outcome::InteractionError(_) => Ok(None),
        }
    }

    fn enter(&self, ctx: &ItemCtx, stage: Stage) {
        debug!("{} → {}", ctx, stage);
    }
}
