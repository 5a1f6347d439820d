//! 结果提取服务 - 业务能力层
//!
//! 从标题中取出标识符，从结果文本中取出分数

use std::sync::LazyLock;

use regex::Regex;

static REP_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RepID=(\S*)").expect("RepID 正则无效"));

/// 从序列标题中提取 `RepID=` 之后、下一个空白之前的值
///
/// 标题中没有 `RepID=` 时原样返回整个标题。
pub fn extract_identifier(header: &str) -> String {
    REP_ID
        .captures_iter(header)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| header.to_string())
}

/// 从结果文本中提取最后一对括号里的内容
///
/// 文本中没有 `(` 时从开头取到第一个 `)`（或全文）。
pub fn extract_score(text: &str) -> String {
    let tail = text.rsplit('(').next().unwrap_or(text);
    tail.split(')').next().unwrap_or(tail).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_identifier() {
        assert_eq!(extract_identifier("tr|ABC|XYZ RepID=UPI000123 n=2"), "UPI000123");
        assert_eq!(extract_identifier("UniRef50 RepID=Q9XYZ1"), "Q9XYZ1");
    }

    #[test]
    fn test_extract_identifier_uses_last_token() {
        assert_eq!(extract_identifier("RepID=OLD x RepID=NEW y"), "NEW");
    }

    #[test]
    fn test_extract_identifier_fallback() {
        assert_eq!(extract_identifier("sp|P12345|NAME_HUMAN"), "sp|P12345|NAME_HUMAN");
    }

    #[test]
    fn test_extract_score() {
        assert_eq!(extract_score("Classification: Yes (0.87)"), "0.87");
        assert_eq!(extract_score("No (score) (0.12)"), "0.12");
        assert_eq!(extract_score("Yes (0.5) trailing"), "0.5");
    }

    #[test]
    fn test_extract_score_without_parentheses() {
        assert_eq!(extract_score("Yes"), "Yes");
    }
}
