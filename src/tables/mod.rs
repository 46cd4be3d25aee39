//! Readers for the two tabular reports written by the search binaries
//!
//! Both reports share one grammar: `#` lines are headers or run metadata,
//! every other line is a run of space-separated tokens. The first tokens map
//! positionally onto a fixed set of typed columns and whatever follows is the
//! free-text description, rejoined with single spaces.

pub mod domtbl;
pub mod tbl;

pub use domtbl::{read_domtbl, read_domtbl_from, DomainCoord, DomainIndex, DomainRecord, DomainScore};
pub use tbl::{read_tbl, read_tbl_from, DomainNumbers, SummaryIndex, SummaryRecord};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::marker::PhantomData;

use crate::error::{ParseError, ParseFailure};
use crate::Result;

/// Which report a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// `--tblout` per-target summary table
    Summary,
    /// `--domtblout` per-domain table
    Domain,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Summary => write!(f, "summary table"),
            TableKind::Domain => write!(f, "domain table"),
        }
    }
}

/// e-value, bit score and bias, kept exactly as printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub e_value: String,
    pub score: String,
    pub bias: String,
}

/// A row type with a fixed column prefix followed by a description
pub trait TableRow: Sized {
    const KIND: TableKind;

    /// Names of the fixed columns, in file order
    const COLUMNS: &'static [&'static str];

    fn from_fields(fields: &Fields<'_>) -> std::result::Result<Self, ParseFailure>;
}

/// Tokens of one data line, addressed by fixed column position
pub struct Fields<'a> {
    tokens: Vec<&'a str>,
    columns: &'static [&'static str],
}

impl<'a> Fields<'a> {
    fn new(
        line: &'a str,
        columns: &'static [&'static str],
    ) -> std::result::Result<Self, ParseFailure> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < columns.len() {
            return Err(ParseFailure::TooFewColumns {
                found: tokens.len(),
                expected: columns.len(),
            });
        }
        Ok(Self { tokens, columns })
    }

    pub fn text(&self, index: usize) -> String {
        self.tokens[index].to_string()
    }

    pub fn int<N: std::str::FromStr>(&self, index: usize) -> std::result::Result<N, ParseFailure> {
        self.tokens[index]
            .parse::<N>()
            .map_err(|_| ParseFailure::InvalidInteger {
                column: self.columns[index],
                value: self.tokens[index].to_string(),
            })
    }

    pub fn score(&self, start: usize) -> Score {
        Score {
            e_value: self.text(start),
            score: self.text(start + 1),
            bias: self.text(start + 2),
        }
    }

    /// Everything after the fixed columns, joined with single spaces
    pub fn description(&self) -> String {
        self.tokens[self.columns.len()..].join(" ")
    }
}

/// Parse one data line; `line_number` is 1-based and only used for errors
pub fn parse_line<T: TableRow>(line: &str, line_number: usize) -> Result<T> {
    Fields::new(line, T::COLUMNS)
        .and_then(|fields| T::from_fields(&fields))
        .map_err(|reason| {
            ParseError {
                kind: T::KIND,
                line_number,
                line: line.to_string(),
                reason,
            }
            .into()
        })
}

/// Streaming reader yielding one typed row per data line
///
/// Comment lines and blank lines produce nothing. The first malformed line
/// is returned as an error; no partial row is ever produced for it.
pub struct TableReader<R, T> {
    reader: R,
    line_number: usize,
    buf: String,
    _row: PhantomData<T>,
}

impl<R: BufRead, T: TableRow> TableReader<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
            _row: PhantomData,
        }
    }
}

impl<R: BufRead, T: TableRow> Iterator for TableReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;

            let line = self.buf.trim_end_matches(['\n', '\r']);
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            return Some(parse_line(line, self.line_number));
        }
    }
}

/// Collect every row from a reader
pub fn read_rows<R: BufRead, T: TableRow>(reader: R) -> Result<Vec<T>> {
    TableReader::new(reader).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["name", "count"];

    #[derive(Debug)]
    struct Pair {
        name: String,
        count: u32,
        description: String,
    }

    impl TableRow for Pair {
        const KIND: TableKind = TableKind::Summary;
        const COLUMNS: &'static [&'static str] = COLUMNS;

        fn from_fields(fields: &Fields<'_>) -> std::result::Result<Self, ParseFailure> {
            Ok(Pair {
                name: fields.text(0),
                count: fields.int(1)?,
                description: fields.description(),
            })
        }
    }

    #[test]
    fn test_collapses_repeated_spaces() {
        let row: Pair = parse_line("   alpha     7   some   long  text", 1).unwrap();
        assert_eq!(row.name, "alpha");
        assert_eq!(row.count, 7);
        assert_eq!(row.description, "some long text");
    }

    #[test]
    fn test_missing_description_is_empty() {
        let row: Pair = parse_line("alpha 7", 1).unwrap();
        assert_eq!(row.description, "");
    }

    #[test]
    fn test_too_few_columns() {
        let err = parse_line::<Pair>("alpha", 3).unwrap_err();
        match err {
            crate::HmmerError::Parse(e) => {
                assert_eq!(e.line_number, 3);
                assert_eq!(e.line, "alpha");
                assert_eq!(
                    e.reason,
                    ParseFailure::TooFewColumns {
                        found: 1,
                        expected: 2
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_integer_names_column() {
        let err = parse_line::<Pair>("alpha seven", 1).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("count"), "{msg}");
        assert!(msg.contains("alpha seven"), "{msg}");
    }

    #[test]
    fn test_reader_skips_comments_and_blank_lines() {
        let input = "# header\nalpha 1\n\n#   indented? no\nbeta 2 desc\r\n# trailer\n";
        let rows: Vec<Pair> = read_rows(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "beta");
        assert_eq!(rows[1].description, "desc");
    }

    #[test]
    fn test_reader_reports_line_number() {
        let input = "# header\nalpha 1\nbeta x\n";
        let result: Result<Vec<Pair>> = read_rows(input.as_bytes());
        match result {
            Err(crate::HmmerError::Parse(e)) => assert_eq!(e.line_number, 3),
            _ => panic!("expected parse error"),
        }
    }
}
