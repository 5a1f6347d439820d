use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 预测页面地址
    pub target_url: String,
    /// 浏览器调试端口；设置时连接已有浏览器，否则自行启动
    pub browser_debug_port: Option<u16>,
    /// 自行启动时是否使用无头模式
    pub headless: bool,
    /// 浏览器可执行文件路径（为空时由 chromiumoxide 自动查找）
    pub chrome_executable: Option<PathBuf>,
    /// 序列输入框的元素 id
    pub input_element_id: String,
    /// 提交按钮包含的文字
    pub submit_button_text: String,
    /// 结果段落包含的分类标记
    pub result_markers: Vec<String>,
    // --- 等待时间 ---
    pub page_ready_timeout_secs: u64,
    pub echo_timeout_secs: u64,
    pub submit_timeout_secs: u64,
    pub result_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: "https://deephase.ch.cam.ac.uk/".to_string(),
            browser_debug_port: None,
            headless: false,
            chrome_executable: None,
            input_element_id: "mat-input-0".to_string(),
            submit_button_text: "Predict".to_string(),
            result_markers: vec!["Yes".to_string(), "No".to_string()],
            page_ready_timeout_secs: 20,
            echo_timeout_secs: 20,
            submit_timeout_secs: 20,
            result_timeout_secs: 60,
            poll_interval_ms: 250,
        }
    }
}

/// 各个等待阶段的超时上限
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub page_ready: Duration,
    pub echo: Duration,
    pub submit: Duration,
    pub result: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Config::default().timeouts()
    }
}

impl Config {
    /// 从环境变量读取配置（未设置的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取配置文件（如有）后再应用环境变量覆盖
    ///
    /// 配置文件路径取自 `PREDICT_CONFIG`，否则尝试当前目录下的 `predict.toml`。
    pub fn load() -> Result<Self> {
        let path = std::env::var("PREDICT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("predict.toml"));

        if path.exists() {
            Ok(Self::from_file(&path)?.with_env_overrides())
        } else {
            Ok(Self::from_env())
        }
    }

    /// 从 TOML 文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            target_url: env_parse("TARGET_URL").unwrap_or(self.target_url),
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").or(self.browser_debug_port),
            headless: env_parse("HEADLESS").unwrap_or(self.headless),
            chrome_executable: env_parse("CHROME_EXECUTABLE").or(self.chrome_executable),
            input_element_id: env_parse("INPUT_ELEMENT_ID").unwrap_or(self.input_element_id),
            submit_button_text: env_parse("SUBMIT_BUTTON_TEXT").unwrap_or(self.submit_button_text),
            result_markers: self.result_markers,
            page_ready_timeout_secs: env_parse("PAGE_READY_TIMEOUT_SECS")
                .unwrap_or(self.page_ready_timeout_secs),
            echo_timeout_secs: env_parse("ECHO_TIMEOUT_SECS").unwrap_or(self.echo_timeout_secs),
            submit_timeout_secs: env_parse("SUBMIT_TIMEOUT_SECS")
                .unwrap_or(self.submit_timeout_secs),
            result_timeout_secs: env_parse("RESULT_TIMEOUT_SECS")
                .unwrap_or(self.result_timeout_secs),
            poll_interval_ms: env_parse("POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            page_ready: Duration::from_secs(self.page_ready_timeout_secs),
            echo: Duration::from_secs(self.echo_timeout_secs),
            submit: Duration::from_secs(self.submit_timeout_secs),
            result: Duration::from_secs(self.result_timeout_secs),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
