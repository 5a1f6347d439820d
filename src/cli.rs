//! 命令行参数

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;

pub const USAGE: &str = "Usage: phase-predict-submit <fasta_file_path>";

/// 将 FASTA 序列批量提交到预测页面并收集分数
#[derive(Debug, Parser)]
#[command(name = "phase-predict-submit", version)]
pub struct Cli {
    /// FASTA 文件路径
    pub input: Option<PathBuf>,

    /// 输出文件名（不含扩展名）；未提供时交互询问
    #[arg(short, long)]
    pub output: Option<String>,

    /// 连接已在该调试端口上运行的浏览器
    #[arg(long)]
    pub port: Option<u16>,

    /// 以无头模式启动浏览器
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// 用命令行参数覆盖配置
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.browser_debug_port = Some(port);
        }
        if self.headless {
            config.headless = true;
        }
    }

    /// 输出文件名：优先取 `--output`，否则从标准输入读取
    pub fn output_base(&self) -> Result<String> {
        match &self.output {
            Some(base) => Ok(base.clone()),
            None => prompt_output_base(io::stdin().lock(), io::stdout()),
        }
    }
}

/// 询问输出文件名（不含扩展名）
pub fn prompt_output_base<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    write!(output, "Enter the output file name (without extension): ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("无法读取输出文件名")?;

    let base = line.trim();
    if base.is_empty() {
        anyhow::bail!("输出文件名不能为空");
    }
    Ok(base.to_string())
}
