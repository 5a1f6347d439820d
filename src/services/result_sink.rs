//! 结果写入服务 - 业务能力层
//!
//! 只负责"写成功表 / 错误表"能力，不关心流程

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{ErrorRecord, PredictionResult};

const SUCCESS_HEADER: [&str; 2] = ["RepID", "Prediction Score"];
const ERROR_HEADER: [&str; 2] = ["Sequence Number", "Error Reason"];

/// 结果输出
///
/// 每次写入都立即落盘，按序列顺序追加。
pub trait ResultSink {
    fn record_success(&mut self, result: &PredictionResult) -> Result<()>;
    fn record_failure(&mut self, record: &ErrorRecord) -> Result<()>;
    /// 刷新两个输出流
    fn finish(&mut self) -> Result<()>;
}

/// 成功表与错误表的文件路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub success: PathBuf,
    pub error: PathBuf,
}

impl OutputPaths {
    /// `base` 不含扩展名：成功表为 `base.csv`，错误表为 `base_ERROR.csv`
    pub fn from_base(base: &str) -> Self {
        Self {
            success: PathBuf::from(format!("{}.csv", base)),
            error: PathBuf::from(format!("{}_ERROR.csv", base)),
        }
    }
}

/// CSV 输出
pub struct CsvResultSink<W: Write> {
    success: csv::Writer<W>,
    error: csv::Writer<W>,
}

impl CsvResultSink<File> {
    /// 创建两个输出文件并写入表头
    pub fn create(paths: &OutputPaths) -> Result<Self> {
        let success = open_file(&paths.success)?;
        let error = open_file(&paths.error)?;
        Self::new(success, error)
    }
}

impl<W: Write> CsvResultSink<W> {
    pub fn new(success: W, error: W) -> Result<Self> {
        let mut sink = Self {
            success: csv::WriterBuilder::new().has_headers(false).from_writer(success),
            error: csv::WriterBuilder::new().has_headers(false).from_writer(error),
        };
        sink.success
            .write_record(SUCCESS_HEADER)
            .context("无法写入成功表表头")?;
        sink.error
            .write_record(ERROR_HEADER)
            .context("无法写入错误表表头")?;
        sink.finish()?;
        Ok(sink)
    }

    /// 取回底层 writer（会先刷新）
    pub fn into_inner(self) -> Result<(W, W)> {
        let success = self
            .success
            .into_inner()
            .map_err(|e| anyhow::anyhow!("刷新成功表失败: {}", e.error()))?;
        let error = self
            .error
            .into_inner()
            .map_err(|e| anyhow::anyhow!("刷新错误表失败: {}", e.error()))?;
        Ok((success, error))
    }
}

impl<W: Write> ResultSink for CsvResultSink<W> {
    fn record_success(&mut self, result: &PredictionResult) -> Result<()> {
        debug!("写入成功表: {} -> {}", result.identifier, result.score);
        self.success.serialize(result).context("无法写入成功表")?;
        self.success.flush().context("无法刷新成功表")?;
        Ok(())
    }

    fn record_failure(&mut self, record: &ErrorRecord) -> Result<()> {
        debug!("写入错误表: {} -> {}", record.index, record.reason);
        self.error.serialize(record).context("无法写入错误表")?;
        self.error.flush().context("无法刷新错误表")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.success.flush().context("无法刷新成功表")?;
        self.error.flush().context("无法刷新错误表")?;
        Ok(())
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("无法创建输出文件: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::from_base("run1");
        assert_eq!(paths.success, PathBuf::from("run1.csv"));
        assert_eq!(paths.error, PathBuf::from("run1_ERROR.csv"));
    }

    #[test]
    fn test_headers_written_on_creation() {
        let sink = CsvResultSink::new(Vec::new(), Vec::new()).unwrap();
        let (success, error) = sink.into_inner().unwrap();
        assert_eq!(as_text(success), "RepID,Prediction Score\n");
        assert_eq!(as_text(error), "Sequence Number,Error Reason\n");
    }

    #[test]
    fn test_rows_in_order() {
        let mut sink = CsvResultSink::new(Vec::new(), Vec::new()).unwrap();
        sink.record_success(&PredictionResult {
            identifier: "UPI1".to_string(),
            score: "0.87".to_string(),
        })
        .unwrap();
        sink.record_failure(&ErrorRecord::item(2, "Prediction for sequence 2 timed out."))
            .unwrap();
        sink.record_failure(&ErrorRecord::run_level("An error occurred: boom, again"))
            .unwrap();

        let (success, error) = sink.into_inner().unwrap();
        assert_eq!(as_text(success), "RepID,Prediction Score\nUPI1,0.87\n");
        assert_eq!(
            as_text(error),
            "Sequence Number,Error Reason\n\
             2,Prediction for sequence 2 timed out.\n\
             N/A,\"An error occurred: boom, again\"\n"
        );
    }

    #[test]
    fn test_create_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("out");
        let paths = OutputPaths::from_base(base.to_str().unwrap());

        let mut sink = CsvResultSink::create(&paths).unwrap();
        sink.record_success(&PredictionResult {
            identifier: "A".to_string(),
            score: "0.1".to_string(),
        })
        .unwrap();

        // 每行写入后即落盘，不必等 finish
        let written = std::fs::read_to_string(&paths.success).unwrap();
        assert_eq!(written, "RepID,Prediction Score\nA,0.1\n");
        assert!(paths.error.exists());
    }
}
