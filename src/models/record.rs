use std::fmt;

use serde::{Serialize, Serializer};

/// 一条待提交的序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// `>` 之后的整行内容（内含 `key=value` 形式的元数据）
    pub header: String,
    /// 去掉换行后拼接的残基序列
    pub residues: String,
}

impl SequenceRecord {
    pub fn new(header: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            residues: residues.into(),
        }
    }
}

/// 成功表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    #[serde(rename = "RepID")]
    pub identifier: String,
    #[serde(rename = "Prediction Score")]
    pub score: String,
}

/// 错误表的序号列：具体序列编号，或运行级错误的占位符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemIndex {
    Item(usize),
    RunLevel,
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemIndex::Item(index) => write!(f, "{}", index),
            ItemIndex::RunLevel => write!(f, "N/A"),
        }
    }
}

impl Serialize for ItemIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ItemIndex::Item(index) => serializer.serialize_u64(*index as u64),
            ItemIndex::RunLevel => serializer.serialize_str("N/A"),
        }
    }
}

/// 错误表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    #[serde(rename = "Sequence Number")]
    pub index: ItemIndex,
    #[serde(rename = "Error Reason")]
    pub reason: String,
}

impl ErrorRecord {
    pub fn item(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index: ItemIndex::Item(index),
            reason: reason.into(),
        }
    }

    pub fn run_level(reason: impl Into<String>) -> Self {
        Self {
            index: ItemIndex::RunLevel,
            reason: reason.into(),
        }
    }
}

impl From<&crate::error::ItemError> for ErrorRecord {
    fn from(err: &crate::error::ItemError) -> Self {
        ErrorRecord::item(err.index(), err.to_string())
    }
}
