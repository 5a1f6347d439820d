//! 表单会话 - 基础设施层接口
//!
//! 流程层只通过这个 trait 操作页面，不依赖浏览器驱动的任何细节

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// 等待 / 点击操作的结果
///
/// 外层 `anyhow::Result` 只承载会话本身的故障（连接断开、脚本执行失败），
/// 超时与交互失败都在这里显式表示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ready(T),
    Timeout,
    InteractionError(String),
}

impl<T> Outcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }
}

/// 元素定位方式
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Id(String),
    XPath(String),
}

impl Locator {
    /// 包含指定文字的按钮
    pub fn button_containing(text: &str) -> Self {
        Locator::XPath(format!("//button[contains(., {})]", xpath_literal(text)))
    }

    /// 文本包含任一标记的段落
    pub fn paragraph_containing_any(markers: &[String]) -> Self {
        let xpath = markers
            .iter()
            .map(|m| format!("//p[contains(text(), {})]", xpath_literal(m)))
            .collect::<Vec<_>>()
            .join(" | ");
        Locator::XPath(xpath)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::XPath(xpath) => write!(f, "{}", xpath),
        }
    }
}

/// XPath 字符串字面量
///
/// XPath 1.0 没有转义：含单引号时改用双引号，两种引号都有时用 `concat()` 拼接。
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{}'", text)
    } else if !text.contains('"') {
        format!("\"{}\"", text)
    } else {
        let parts = text
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect::<Vec<_>>()
            .join(", \"'\", ");
        format!("concat({})", parts)
    }
}

/// 已定位元素的引用
///
/// 只保存定位方式；页面刷新后再次使用时可能已经失效。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub locator: Locator,
}

impl ElementRef {
    pub fn new(locator: Locator) -> Self {
        Self { locator }
    }
}

/// 等待条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// 输入框存在
    InputPresent,
    /// 输入框的值等于给定文本
    InputValueEquals(String),
    /// 元素存在
    Present(Locator),
    /// 元素存在且文本不同于 `previous`
    TextChanged { locator: Locator, previous: String },
}

/// 一个与目标页面的活动连接
///
/// 整次运行只使用一个会话，所有方法都由同一个流程顺序调用。
#[async_trait]
pub trait FormSession: Send {
    /// 清空输入框
    async fn clear_input(&mut self) -> Result<()>;

    /// 写入输入框
    async fn set_input_value(&mut self, text: &str) -> Result<()>;

    /// 在超时内轮询直到条件成立
    async fn wait_until(
        &mut self,
        condition: &Condition,
        timeout: Duration,
    ) -> Result<Outcome<ElementRef>>;

    /// 在超时内轮询直到元素存在且可点击
    async fn find_clickable(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Outcome<ElementRef>>;

    /// 点击元素
    async fn click(&mut self, element: &ElementRef) -> Result<Outcome<()>>;

    /// 读取元素文本；元素已不存在时返回 `None`
    async fn read_text(&mut self, element: &ElementRef) -> Result<Option<String>>;

    /// 关闭会话
    async fn close(&mut self) -> Result<()>;
}
