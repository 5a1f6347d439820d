//! 序列处理上下文
//!
//! 封装"我正在处理第几条序列"这一信息

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCtx {
    /// 序列编号（从1开始）
    pub index: usize,
    /// 序列总数（仅用于日志显示）
    pub total: usize,
}

impl ItemCtx {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }

    /// 第一条序列开始时输入框为空，不需要清空
    pub fn is_first(&self) -> bool {
        self.index == 1
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[序列 {}/{}]", self.index, self.total)
    }
}
