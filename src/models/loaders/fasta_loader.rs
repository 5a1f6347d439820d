use std::path::Path;

use tokio::fs;

use crate::error::{RunError, RunResult};
use crate::models::record::SequenceRecord;

/// 记录分隔符
const RECORD_DELIMITER: char = '>';

/// 读取 FASTA 文件并解析为序列列表
///
/// 只有文件无法打开时返回错误；内容格式异常不会报错，只会得到边界不符合预期的记录。
pub async fn load_fasta_records(path: &Path) -> RunResult<Vec<SequenceRecord>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| RunError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let records = parse_fasta(&content);
    tracing::info!(
        "成功加载 {} 条序列: {}",
        records.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(records)
}

/// 解析 FASTA 文本
///
/// - 以 `>` 开头的行开始新记录，并清空残基缓冲
/// - 其余行去掉首尾空白后直接拼接
/// - 第一个标题行之前的内容被丢弃，标题为空的记录不输出
pub fn parse_fasta(content: &str) -> Vec<SequenceRecord> {
    let mut records = Vec::new();
    let mut header: Option<String> = None;
    let mut residues = String::new();

    for line in content.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(RECORD_DELIMITER) {
            flush_record(&mut records, header.take(), &mut residues);
            header = Some(rest.to_string());
        } else if header.is_some() {
            residues.push_str(line);
        }
    }
    flush_record(&mut records, header, &mut residues);

    records
}

fn flush_record(records: &mut Vec<SequenceRecord>, header: Option<String>, residues: &mut String) {
    let residues = std::mem::take(residues);
    if let Some(header) = header.filter(|h| !h.is_empty()) {
        records.push(SequenceRecord { header, residues });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concatenates_lines() {
        let records = parse_fasta(">seq1 RepID=A\nMKV\nLLA\n>seq2 RepID=B\nGGG\n");
        assert_eq!(
            records,
            vec![
                SequenceRecord::new("seq1 RepID=A", "MKVLLA"),
                SequenceRecord::new("seq2 RepID=B", "GGG"),
            ]
        );
    }

    #[test]
    fn test_parse_without_headers_is_empty() {
        assert!(parse_fasta("MKVLLA\nGGG\n").is_empty());
        assert!(parse_fasta("").is_empty());
    }

    #[test]
    fn test_parse_drops_leading_lines() {
        let records = parse_fasta("JUNK\n>only\nAAA\n");
        assert_eq!(records, vec![SequenceRecord::new("only", "AAA")]);
    }

    #[test]
    fn test_parse_header_without_residues() {
        let records = parse_fasta(">first\n>second\nCCC");
        assert_eq!(
            records,
            vec![
                SequenceRecord::new("first", ""),
                SequenceRecord::new("second", "CCC"),
            ]
        );
    }

    #[test]
    fn test_parse_skips_empty_header() {
        let records = parse_fasta(">\nAAA\n>named\nCCC\n");
        assert_eq!(records, vec![SequenceRecord::new("named", "CCC")]);
    }

    #[test]
    fn test_parse_strips_whitespace_and_crlf() {
        let records = parse_fasta(">tr|X|Y RepID=UPI1 n=2\r\n  MKV  \r\n\r\nLL\r\n");
        assert_eq!(records, vec![SequenceRecord::new("tr|X|Y RepID=UPI1 n=2", "MKVLL")]);
    }

    #[test]
    fn test_record_count_matches_header_count() {
        let content: String = (1..=25).map(|i| format!(">s{}\nAC\nGT\n", i)).collect();
        let records = parse_fasta(&content);
        assert_eq!(records.len(), 25);
        assert!(records.iter().all(|r| r.residues == "ACGT"));
    }

    #[tokio::test]
    async fn test_load_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.fasta");
        std::fs::write(&path, ">a RepID=1\nMK\nV\n>b RepID=2\nLL\n").unwrap();

        let first = load_fasta_records(&path).await.unwrap();
        let second = load_fasta_records(&path).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_fasta_records(&dir.path().join("missing.fasta"))
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::InputUnavailable { .. }));
    }
}
