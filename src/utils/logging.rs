//! 日志工具模块
//!
//! 提供日志初始化与格式化输出的辅助函数

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::RunStats;
use crate::services::result_sink::OutputPaths;

/// 初始化日志
///
/// 日志级别取自 `RUST_LOG`，默认 `info`。重复调用不会报错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, input: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 序列预测批量提交");
    info!("🕒 启动时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🌐 目标页面: {}", config.target_url);
    info!("📄 输入文件: {}", input.display());
    info!("{}", "=".repeat(60));
}

/// 记录序列加载信息
pub fn log_records_loaded(total: usize) {
    info!("✓ 找到 {} 条待处理的序列", total);
    info!("📋 将按顺序逐条提交\n");
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &RunStats, outputs: &OutputPaths) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!("完成时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("总耗时: {} 秒", stats.elapsed.as_secs());
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.succeeded, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("结果: {}", outputs.success.display());
    info!("错误: {}", outputs.error.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
