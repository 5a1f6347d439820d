//! 错误类型
//!
//! 分两层：
//! - [`ItemError`]：单条序列的失败，记录到错误表后继续下一条
//! - [`RunError`]：整次运行级别的失败，中止剩余批次并有序关闭资源

use std::path::PathBuf;

use thiserror::Error;

/// 单条序列处理失败（可恢复，不影响后续序列）
///
/// `Display` 的文本会原样写入错误表的 `Error Reason` 列。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// 输入框的值在超时内没有回显为刚写入的序列
    #[error("Input for sequence {index} was not registered by the page.")]
    EchoTimeout { index: usize },

    /// 提交按钮在超时内不存在或不可点击
    #[error("Predict button not found or not clickable for sequence {index}.")]
    SubmitNotFound { index: usize },

    /// 定位到按钮后点击失败（元素失效或不可交互）
    #[error("Error clicking the predict button for sequence {index}: {reason}")]
    SubmitInteractionFailed { index: usize, reason: String },

    /// 预测结果在超时内没有出现
    #[error("Prediction for sequence {index} timed out.")]
    ResultTimeout { index: usize },

    /// 结果元素出现过但读不到分数
    #[error("Prediction score not found for sequence {index}.")]
    ResultElementMissing { index: usize },
}

impl ItemError {
    /// 失败序列的编号（从 1 开始）
    pub fn index(&self) -> usize {
        match self {
            ItemError::EchoTimeout { index }
            | ItemError::SubmitNotFound { index }
            | ItemError::SubmitInteractionFailed { index, .. }
            | ItemError::ResultTimeout { index }
            | ItemError::ResultElementMissing { index } => *index,
        }
    }
}

/// 运行级错误（不可恢复，中止剩余批次）
#[derive(Debug, Error)]
pub enum RunError {
    /// 输入文件无法打开
    #[error("Unable to open input file {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 页面加载后输入框始终没有出现
    #[error("Failed to load element or button not found.")]
    PageNotReady,

    /// 浏览器会话异常（连接断开、脚本执行失败等）
    #[error("An error occurred: {0}")]
    Session(#[source] anyhow::Error),

    /// 结果文件写入失败
    #[error("Failed to write results: {0}")]
    Sink(#[source] anyhow::Error),

    /// 收到中断信号
    #[error("Run interrupted before all sequences were processed.")]
    Interrupted,
}

/// 运行结果类型
pub type RunResult<T> = Result<T, RunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_error_reasons() {
        assert_eq!(
            ItemError::SubmitNotFound { index: 2 }.to_string(),
            "Predict button not found or not clickable for sequence 2."
        );
        assert_eq!(
            ItemError::ResultTimeout { index: 7 }.to_string(),
            "Prediction for sequence 7 timed out."
        );
        assert_eq!(
            ItemError::SubmitInteractionFailed {
                index: 3,
                reason: "stale element".to_string()
            }
            .to_string(),
            "Error clicking the predict button for sequence 3: stale element"
        );
    }

    #[test]
    fn test_item_error_index() {
        assert_eq!(ItemError::ResultElementMissing { index: 4 }.index(), 4);
        assert_eq!(ItemError::EchoTimeout { index: 1 }.index(), 1);
    }

    #[test]
    fn test_run_error_session_message() {
        let err = RunError::Session(anyhow::anyhow!("websocket closed"));
        assert_eq!(err.to_string(), "An error occurred: websocket closed");
    }
}
