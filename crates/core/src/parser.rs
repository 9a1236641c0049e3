//! Block parser: recovers slide records from loosely formatted text.
//!
//! The input is a sequence of blank-line separated blocks. Each block starts
//! with a header of the form `幻灯片<n>：<title>`, followed by body lines.
//! Parsing is fail-soft per block: a malformed block is dropped, reported as
//! a [`Diagnostic`], and the remaining blocks are still attempted.

use crate::types::{ContentLine, CoverField, SlideRecord, SlideRole};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Prefix every block header must start with.
pub const HEADER_PREFIX: &str = "幻灯片";

/// Full-width colon separating the header from the title.
pub const HEADER_SEPARATOR: char = '：';

/// One or more blank (or whitespace-only) lines between blocks.
static BLOCK_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").unwrap());

/// A whole trimmed line wrapped in square brackets.
static IMAGE_HINT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*)\]$").unwrap());

/// Leading `- ` bullet marker (or a lone `-`).
static BULLET_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-(?:\s+|$)").unwrap());

/// Why a block was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Missing separator, or the header does not start with the prefix.
    #[error("unparseable header")]
    UnparseableHeader,

    /// The text between prefix and separator is not an integer.
    #[error("invalid slide number")]
    InvalidSlideNumber,
}

/// A dropped block, kept for logging and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 0-based index of the block among non-empty blocks.
    pub block_index: usize,

    /// The header line as it appeared in the input.
    pub header: String,

    /// Reason the block was dropped.
    pub kind: BlockError,
}

/// Records and diagnostics from one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Records in input order.
    pub records: Vec<SlideRecord>,

    /// One entry per dropped block.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    /// Compare the parsed record count with the requested slide count.
    ///
    /// Returns `(expected, actual)` when they differ. Nothing is padded or
    /// trimmed; this is for reporting only.
    pub fn count_mismatch(&self, expected: usize) -> Option<(usize, usize)> {
        let actual = self.records.len();
        (actual != expected).then_some((expected, actual))
    }
}

/// Parser for generated slide text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockParser;

impl BlockParser {
    /// Create a new block parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse raw text into slide records, dropping malformed blocks.
    pub fn parse(&self, raw: &str) -> Vec<SlideRecord> {
        self.parse_with_report(raw).records
    }

    /// Parse raw text, returning records together with diagnostics for
    /// every dropped block.
    pub fn parse_with_report(&self, raw: &str) -> ParseReport {
        let text = raw.replace("\r\n", "\n").replace('\r', "\n");
        let mut report = ParseReport::default();

        let blocks = BLOCK_SEPARATOR_REGEX
            .split(&text)
            .map(str::trim)
            .filter(|block| !block.is_empty());

        for (block_index, block) in blocks.enumerate() {
            match parse_block(block) {
                Ok(record) => {
                    log::debug!(
                        "Parsed slide {} ({:?}) with {} lines",
                        record.number,
                        record.role,
                        record.lines.len()
                    );
                    report.records.push(record);
                }
                Err(kind) => {
                    let header = block.lines().next().unwrap_or_default().to_string();
                    log::warn!("Dropping block {}: {} ({:?})", block_index, kind, header);
                    report.diagnostics.push(Diagnostic {
                        block_index,
                        header,
                        kind,
                    });
                }
            }
        }

        report
    }
}

/// Parse one non-empty block.
fn parse_block(block: &str) -> Result<SlideRecord, BlockError> {
    let mut lines = block.lines();
    let header = lines.next().unwrap_or_default();
    let (number, title) = parse_header(header)?;

    let mut record = SlideRecord::new(number, title);
    let body = lines.filter(|line| !line.trim().is_empty());

    match record.role {
        SlideRole::Cover => {
            for line in body {
                match CoverField::match_line(line.trim_start()) {
                    Some((CoverField::Title, value)) => {
                        record.cover_title = Some(value.trim().to_string());
                    }
                    Some((CoverField::Subtitle, value)) => {
                        record.cover_subtitle = Some(value.trim().to_string());
                    }
                    None => log::debug!("Ignoring unlabeled cover line: {:?}", line),
                }
            }
        }
        SlideRole::TableOfContents | SlideRole::Body => {
            record.lines = body.map(classify_line).collect();
        }
    }

    Ok(record)
}

/// Split a header into slide number and title.
fn parse_header(header: &str) -> Result<(i64, String), BlockError> {
    let (label, title) = header
        .split_once(HEADER_SEPARATOR)
        .ok_or(BlockError::UnparseableHeader)?;

    let digits = label
        .trim()
        .strip_prefix(HEADER_PREFIX)
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
        .ok_or(BlockError::UnparseableHeader)?;

    let number = digits
        .parse::<i64>()
        .map_err(|_| BlockError::InvalidSlideNumber)?;

    Ok((number, title.trim().to_string()))
}

/// Classify a non-cover body line as an image hint or a bullet.
fn classify_line(line: &str) -> ContentLine {
    let trimmed = line.trim();
    let indent_level = u8::from(indent_width(line) >= 2);

    if let Some(caps) = IMAGE_HINT_REGEX.captures(trimmed) {
        return ContentLine::image_hint(caps[1].trim(), indent_level);
    }

    let text = BULLET_MARKER_REGEX.replace(trimmed, "");
    ContentLine::bullet(text.trim(), indent_level)
}

/// Width of leading whitespace, counting a tab as two columns.
fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineKind;

    #[test]
    fn test_parse_header() {
        assert_eq!(parse_header("幻灯片3：结论"), Ok((3, "结论".to_string())));
        assert_eq!(parse_header("幻灯片 12 ： 参考资料 "), Ok((12, "参考资料".to_string())));
        assert_eq!(
            parse_header("幻灯片4：时间：2024"),
            Ok((4, "时间：2024".to_string()))
        );
    }

    #[test]
    fn test_parse_header_errors() {
        assert_eq!(parse_header("幻灯片3 结论"), Err(BlockError::UnparseableHeader));
        assert_eq!(parse_header("第3页：结论"), Err(BlockError::UnparseableHeader));
        assert_eq!(parse_header("幻灯片：结论"), Err(BlockError::UnparseableHeader));
        assert_eq!(parse_header("幻灯片X：标题"), Err(BlockError::InvalidSlideNumber));
        assert_eq!(parse_header("幻灯片3.5：标题"), Err(BlockError::InvalidSlideNumber));
    }

    #[test]
    fn test_any_integer_number_is_accepted() {
        assert_eq!(parse_header("幻灯片-1：附录"), Ok((-1, "附录".to_string())));
        assert_eq!(
            parse_header("幻灯片4294967296：附录"),
            Ok((4_294_967_296, "附录".to_string()))
        );

        let report = BlockParser::new().parse_with_report("幻灯片-1：附录\n- a");
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].role, SlideRole::Body);
        assert_eq!(report.records[0].lines, vec![ContentLine::bullet("a", 0)]);
    }

    #[test]
    fn test_classify_bullets() {
        assert_eq!(classify_line("- 要点"), ContentLine::bullet("要点", 0));
        assert_eq!(classify_line("  - 子项"), ContentLine::bullet("子项", 1));
        assert_eq!(classify_line("\t- 子项"), ContentLine::bullet("子项", 1));
        assert_eq!(classify_line(" - 单空格"), ContentLine::bullet("单空格", 0));
        assert_eq!(classify_line("无标记"), ContentLine::bullet("无标记", 0));
        assert_eq!(classify_line("-5% 增长"), ContentLine::bullet("-5% 增长", 0));
    }

    #[test]
    fn test_classify_image_hint() {
        let line = classify_line("[图表示意图]");
        assert_eq!(line.kind, LineKind::ImageHint);
        assert_eq!(line.text, "图表示意图");
        assert_eq!(line.indent_level, 0);

        let line = classify_line("  [ 流程图 ]  ");
        assert_eq!(line.kind, LineKind::ImageHint);
        assert_eq!(line.text, "流程图");
    }

    #[test]
    fn test_partial_brackets_are_bullets() {
        let line = classify_line("- [参考] 文献");
        assert_eq!(line.kind, LineKind::Bullet);
        assert_eq!(line.text, "[参考] 文献");
    }

    #[test]
    fn test_cover_block() {
        let records = BlockParser::new().parse("幻灯片1：标题\n标题：A\n副标题：B");
        assert_eq!(records.len(), 1);
        let cover = &records[0];
        assert_eq!(cover.role, SlideRole::Cover);
        assert_eq!(cover.cover_title.as_deref(), Some("A"));
        assert_eq!(cover.cover_subtitle.as_deref(), Some("B"));
        assert!(cover.lines.is_empty());
    }

    #[test]
    fn test_cover_ignores_unlabeled_lines() {
        let records = BlockParser::new().parse("幻灯片1：封面\n- 杂项\n标题： 主标题 \n随便写写");
        assert_eq!(records[0].cover_title.as_deref(), Some("主标题"));
        assert_eq!(records[0].cover_subtitle, None);
        assert!(records[0].lines.is_empty());
    }

    #[test]
    fn test_cover_last_label_wins() {
        let records =
            BlockParser::new().parse("幻灯片1：封面\n标题：初稿\n副标题：一\n标题：定稿\n副标题：二");
        assert_eq!(records[0].cover_title.as_deref(), Some("定稿"));
        assert_eq!(records[0].cover_subtitle.as_deref(), Some("二"));
    }

    #[test]
    fn test_cover_label_after_whitespace() {
        let records = BlockParser::new().parse("幻灯片1：封面\n  标题：A\n\t副标题：B");
        assert_eq!(records[0].cover_title.as_deref(), Some("A"));
        assert_eq!(records[0].cover_subtitle.as_deref(), Some("B"));
    }

    #[test]
    fn test_indented_image_hint_keeps_parsed_level() {
        let records = BlockParser::new().parse("幻灯片3：内容\n  [图]");
        assert_eq!(records[0].lines, vec![ContentLine::image_hint("图", 1)]);
        assert!(records[0].lines[0].is_image_hint());
        assert_eq!(records[0].line_count(), 1);
    }

    #[test]
    fn test_header_only_block() {
        let records = BlockParser::new().parse("幻灯片9：参考资料");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].role, SlideRole::Body);
        assert!(records[0].lines.is_empty());
    }

    #[test]
    fn test_block_separator_variants() {
        let raw = "幻灯片1：封面\r\n标题：A\r\n\r\n幻灯片2：目录\n- 一\n   \n\n\n幻灯片3：内容\n- 二";
        let records = BlockParser::new().parse(raw);
        let numbers: Vec<i64> = records.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_report_collects_diagnostics() {
        let raw = "幻灯片3 结论\n- a\n\n幻灯片X：标题\n- b\n\n幻灯片4：内容\n- c";
        let report = BlockParser::new().parse_with_report(raw);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].number, 4);
        assert_eq!(
            report.diagnostics,
            vec![
                Diagnostic {
                    block_index: 0,
                    header: "幻灯片3 结论".to_string(),
                    kind: BlockError::UnparseableHeader,
                },
                Diagnostic {
                    block_index: 1,
                    header: "幻灯片X：标题".to_string(),
                    kind: BlockError::InvalidSlideNumber,
                },
            ]
        );
    }

    #[test]
    fn test_count_mismatch() {
        let report = BlockParser::new().parse_with_report("幻灯片1：封面\n\n幻灯片2：目录");
        assert_eq!(report.count_mismatch(2), None);
        assert_eq!(report.count_mismatch(5), Some((5, 2)));
    }

    #[test]
    fn test_order_is_input_order() {
        let records = BlockParser::new().parse("幻灯片5：五\n\n幻灯片3：三\n\n幻灯片4：四");
        let numbers: Vec<i64> = records.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![5, 3, 4]);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(BlockError::UnparseableHeader.to_string(), "unparseable header");
        assert_eq!(BlockError::InvalidSlideNumber.to_string(), "invalid slide number");
    }
}
