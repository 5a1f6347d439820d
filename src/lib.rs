//! # Phase Predict Submit
//!
//! 将 FASTA 序列逐条提交到单页预测网站，收集每条序列的预测分数
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露 `FormSession` 能力
//! - `JsExecutor` - 唯一的 page owner，提供脚本执行能力
//! - `PageSession` - 基于 chromiumoxide 的表单会话
//!
//! ### ② 业务能力层（Services）
//! - `extract` - 标识符 / 分数提取
//! - `progress` - 剩余时间估算
//! - `result_sink` - 成功表 / 错误表写入
//!
//! ### ③ 流程层（Workflow）
//! - `SubmissionFlow` - 一条序列的完整流程（输入 → 回显 → 提交 → 结果 → 提取）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/pipeline` - 顺序处理整批序列，隔离单条失败
//! - `orchestrator/app` - 资源获取与收尾
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, Timeouts};
pub use error::{ItemError, RunError, RunResult};
pub use infrastructure::{Condition, ElementRef, FormSession, Locator, Outcome};
pub use models::{ErrorRecord, ItemIndex, PredictionResult, SequenceRecord};
pub use orchestrator::{App, RunStats, SubmissionPipeline};
pub use workflow::{ItemCtx, SubmissionFlow};
