//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 创建输出文件、读取输入、打开浏览器会话
//! - 任一资源获取失败时写入运行级错误
//! - 输出最终统计
//!
//! ### `pipeline` - 序列提交流水线
//! - 独占表单会话，按顺序处理所有序列
//! - 单条失败只记录，运行级失败中止
//! - 保证刷新输出并关闭会话
//!
//! ## 层次关系
//!
//! ```text
//! app (资源获取)
//!     ↓
//! pipeline (处理 Vec<SequenceRecord>)
//!     ↓
//! workflow::SubmissionFlow (处理单条序列)
//!     ↓
//! infrastructure::FormSession (页面操作能力)
//! ```

pub mod app;
pub mod pipeline;

pub use app::App;
pub use pipeline::{RunStats, SubmissionPipeline};
