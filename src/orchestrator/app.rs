//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **资源获取**：创建输出文件、读取输入、打开浏览器会话
//! 2. **委托执行**：交给 [`SubmissionPipeline`] 逐条处理
//! 3. **收尾**：任何一步失败都在错误表写入 `N/A` 行并刷新输出
//! 4. **统计**：输出最终结果

use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::{RunError, RunResult};
use crate::models::{load_fasta_records, SequenceRecord};
use crate::orchestrator::pipeline::{record_run_failure, RunStats, SubmissionPipeline};
use crate::services::result_sink::{CsvResultSink, OutputPaths, ResultSink};
use crate::utils::logging::{log_records_loaded, log_startup, print_final_stats};
use crate::workflow::SubmissionFlow;

/// 应用主结构
pub struct App {
    config: Config,
    input: PathBuf,
    outputs: OutputPaths,
}

impl App {
    pub fn new(config: Config, input: PathBuf, outputs: OutputPaths) -> Self {
        Self {
            config,
            input,
            outputs,
        }
    }

    /// 运行整批预测
    ///
    /// 只有输出文件无法创建时返回错误；运行级错误已写入错误表，以 `Ok(Err(..))` 返回。
    pub async fn run(self) -> Result<RunResult<RunStats>> {
        log_startup(&self.config, &self.input);

        let mut sink = CsvResultSink::create(&self.outputs)?;
        let result = self.execute(&mut sink).await;

        if let Err(e) = sink.finish() {
            error!("刷新输出文件失败: {:#}", e);
        }

        match &result {
            Ok(stats) => {
                print_final_stats(stats, &self.outputs);
                info!(
                    "Prediction successful! Output saved to {}",
                    self.outputs.success.display()
                );
            }
            Err(err) => {
                error!("❌ 预测未完成: {}", err);
                info!("错误记录已保存至: {}", self.outputs.error.display());
            }
        }

        Ok(result)
    }

    async fn execute(&self, sink: &mut CsvResultSink<std::fs::File>) -> RunResult<RunStats> {
        let records = match self.load_records().await {
            Ok(records) => records,
            Err(err) => {
                record_run_failure(sink, &err);
                return Err(err);
            }
        };

        if records.is_empty() {
            warn!("⚠️ 输入文件中没有序列，程序结束");
            return Ok(RunStats::default());
        }

        let session = match browser::open_session(&self.config).await {
            Ok(session) => session,
            Err(e) => {
                let err = RunError::Session(e);
                record_run_failure(sink, &err);
                return Err(err);
            }
        };

        let pipeline = SubmissionPipeline::new(session, SubmissionFlow::new(&self.config));
        pipeline.run_to_completion(&records, sink).await
    }

    async fn load_records(&self) -> RunResult<Vec<SequenceRecord>> {
        info!("📁 正在读取序列文件...");
        let records = load_fasta_records(&self.input).await?;
        log_records_loaded(records.len());
        Ok(records)
    }
}
