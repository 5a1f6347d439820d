//! 序列提交流水线 - 编排层
//!
//! ## 职责
//!
//! - 独占一个 [`FormSession`]，整次运行复用
//! - 按输入顺序逐条调用 [`SubmissionFlow`]
//! - 每条序列恰好写入一行成功或错误记录
//! - 每条之后重新估算剩余时间
//! - 无论以何种方式结束，都刷新输出并关闭会话
//!
//! 单条序列的失败只记录不中止；会话故障、写入失败、中断信号属于运行级错误，
//! 中止剩余批次并在错误表中写入一行 `N/A`。

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::error::{RunError, RunResult};
use crate::infrastructure::{Condition, FormSession, Outcome};
use crate::models::{ErrorRecord, SequenceRecord};
use crate::services::progress::ProgressEstimator;
use crate::services::result_sink::ResultSink;
use crate::workflow::{ItemCtx, SubmissionFlow};

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// 序列提交流水线
pub struct SubmissionPipeline<S: FormSession> {
    session: S,
    flow: SubmissionFlow,
    stats: RunStats,
}

impl<S: FormSession> SubmissionPipeline<S> {
    pub fn new(session: S, flow: SubmissionFlow) -> Self {
        Self {
            session,
            flow,
            stats: RunStats::default(),
        }
    }

    /// 最近一次运行的统计（运行中途失败时为已完成部分）
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// 等待页面上的输入框出现
    pub async fn wait_ready(&mut self) -> RunResult<()> {
        info!("⏳ 等待页面加载...");
        let timeout = self.flow.timeouts().page_ready;
        match self
            .session
            .wait_until(&Condition::InputPresent, timeout)
            .await
            .map_err(RunError::Session)?
        {
            Outcome::Ready(_) => Ok(()),
            Outcome::Timeout | Outcome::InteractionError(_) => Err(RunError::PageNotReady),
        }
    }

    /// 依次处理所有序列
    ///
    /// 只有运行级错误会提前返回；已写入的行保持不变。
    pub async fn run<K: ResultSink + ?Sized>(
        &mut self,
        records: &[SequenceRecord],
        sink: &mut K,
    ) -> RunResult<RunStats> {
        let total = records.len();
        self.stats = RunStats {
            total,
            ..Default::default()
        };

        self.wait_ready().await?;

        let estimator = ProgressEstimator::start(total);
        for (offset, record) in records.iter().enumerate() {
            let ctx = ItemCtx::new(offset + 1, total);

            let outcome = self
                .flow
                .run(&mut self.session, record, &ctx)
                .await
                .map_err(RunError::Session)?;

            match outcome {
                Ok(result) => {
                    sink.record_success(&result).map_err(RunError::Sink)?;
                    self.stats.succeeded += 1;
                    info!("{} ✓ {} 分数: {}", ctx, result.identifier, result.score);
                }
                Err(err) => {
                    warn!("{} ⚠️ {}", ctx, err);
                    sink.record_failure(&ErrorRecord::from(&err))
                        .map_err(RunError::Sink)?;
                    self.stats.failed += 1;
                }
            }

            self.stats.elapsed = estimator.elapsed();
            let remaining = estimator.remaining(ctx.index);
            info!(
                "📊 已处理 {}/{} 条序列，预计剩余 {} 秒",
                ctx.index,
                total,
                remaining.as_secs()
            );
        }

        self.stats.elapsed = estimator.elapsed();
        Ok(self.stats)
    }

    /// 运行整批并保证收尾
    ///
    /// 与 Ctrl-C 竞争执行；结束后（含中断和运行级错误）写入 `N/A` 行、刷新输出、关闭会话。
    pub async fn run_to_completion<K: ResultSink + ?Sized>(
        self,
        records: &[SequenceRecord],
        sink: &mut K,
    ) -> RunResult<RunStats> {
        self.run_until(records, sink, interrupted).await
    }

    /// 与 `interrupt` 返回的信号竞争执行整批
    ///
    /// 信号在运行期间触发时中止批次；关闭会话期间再次触发时放弃等待会话关闭。
    pub async fn run_until<K, F, Fut>(
        mut self,
        records: &[SequenceRecord],
        sink: &mut K,
        mut interrupt: F,
    ) -> RunResult<RunStats>
    where
        K: ResultSink + ?Sized,
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let result = tokio::select! {
            biased;
            _ = interrupt() => Err(RunError::Interrupted),
            res = self.run(records, &mut *sink) => res,
        };

        if let Err(err) = &result {
            record_run_failure(sink, err);
            warn!(
                "运行中止: 已完成 {}/{} 条序列",
                self.stats.completed(),
                self.stats.total
            );
        }

        if let Err(e) = sink.finish() {
            error!("刷新输出文件失败: {:#}", e);
        }

        tokio::select! {
            biased;
            res = self.shutdown() => {
                if let Err(e) = res {
                    warn!("关闭会话失败: {:#}", e);
                }
            }
            _ = interrupt() => warn!("⚠️ 关闭会话期间再次收到中断信号，不再等待会话关闭"),
        }

        result
    }

    /// 关闭会话
    pub async fn shutdown(mut self) -> Result<()> {
        self.session.close().await
    }
}

/// 记录运行级错误并写入错误表的 `N/A` 行
pub fn record_run_failure<K: ResultSink + ?Sized>(sink: &mut K, err: &RunError) {
    error!("❌ {}", err);
    if let Err(e) = sink.record_failure(&ErrorRecord::run_level(err.to_string())) {
        error!("无法写入运行级错误: {:#}", e);
    }
}

/// 收到 Ctrl-C 时返回；无法监听信号时永不返回
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听中断信号: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("收到中断信号，正在停止...");
}
