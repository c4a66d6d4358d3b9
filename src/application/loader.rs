//! Indentation documents to records.
//!
//! Every run of two spaces marks one level. Runs are replaced by a separator
//! and the line is split into positional fields `level1, level2, ...`.

use tracing::trace;

use crate::domain::Record;

/// Separator substituted for each two-space indentation unit.
pub const LEVEL_SEPARATOR: char = '|';

const INDENT: &str = "  ";

/// One record per line, in file order. Blank lines yield blank records so
/// record indices match line positions.
pub fn parse_document(raw: &str) -> Vec<Record> {
    let records: Vec<Record> = raw.lines().map(parse_line).collect();
    trace!("parsed {} records", records.len());
    records
}

pub fn parse_line(line: &str) -> Record {
    let line = line.replace(INDENT, &LEVEL_SEPARATOR.to_string());
    Record::from_fields(line.split(LEVEL_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a", 1, "a")]
    #[case("  b", 2, "b")]
    #[case("    c", 3, "c")]
    #[case("      deep name", 4, "deep name")]
    fn given_indented_line_when_parsing_then_depth_follows_indent(
        #[case] line: &str,
        #[case] depth: usize,
        #[case] name: &str,
    ) {
        let record = parse_line(line);
        assert_eq!(record.declared_depth(), Some(depth));
        assert_eq!(record.value_at(depth), Some(name));
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    #[case("    ")]
    fn given_whitespace_line_when_parsing_then_record_is_blank(#[case] line: &str) {
        assert!(parse_line(line).is_blank());
    }

    #[test]
    fn given_document_when_parsing_then_keeps_one_record_per_line() {
        let records = parse_document("a\n  b\n\n  c\n");
        assert_eq!(records.len(), 4);
        assert!(records[2].is_blank());
    }

    #[test]
    fn given_crlf_document_when_parsing_then_strips_carriage_returns() {
        let records = parse_document("a\r\n  b\r\n");
        assert_eq!(records[1].value_at(2), Some("b"));
    }
}
