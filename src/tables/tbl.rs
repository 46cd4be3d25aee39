//! Per-target summary table (`--tblout`)

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{read_rows, Fields, Score, TableKind, TableRow};
use crate::error::ParseFailure;
use crate::Result;

const COLUMNS: &[&str] = &[
    "target_name",
    "target_accession",
    "query_name",
    "query_accession",
    "e_value",
    "score",
    "bias",
    "best1_e_value",
    "best1_score",
    "best1_bias",
    "exp",
    "reg",
    "clu",
    "ov",
    "env",
    "dom",
    "rep",
    "inc",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryIndex {
    pub name: String,
    /// `-` when the file carries no accession
    pub accession: String,
}

/// Domain number estimation columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainNumbers {
    /// Expected number of domains; printed as a decimal, so kept as text
    pub exp: String,
    pub reg: u32,
    pub clu: u32,
    pub ov: u32,
    pub env: u32,
    pub dom: u32,
    pub rep: u32,
    pub inc: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub target: SummaryIndex,
    pub query: SummaryIndex,
    pub full_sequence: Score,
    pub best_1_domain: Score,
    pub domain_numbers: DomainNumbers,
    pub description: String,
}

impl SummaryRecord {
    /// The fixed columns rendered back to text, in file order
    pub fn fixed_fields(&self) -> Vec<String> {
        let n = &self.domain_numbers;
        vec![
            self.target.name.clone(),
            self.target.accession.clone(),
            self.query.name.clone(),
            self.query.accession.clone(),
            self.full_sequence.e_value.clone(),
            self.full_sequence.score.clone(),
            self.full_sequence.bias.clone(),
            self.best_1_domain.e_value.clone(),
            self.best_1_domain.score.clone(),
            self.best_1_domain.bias.clone(),
            n.exp.clone(),
            n.reg.to_string(),
            n.clu.to_string(),
            n.ov.to_string(),
            n.env.to_string(),
            n.dom.to_string(),
            n.rep.to_string(),
            n.inc.to_string(),
        ]
    }
}

impl TableRow for SummaryRecord {
    const KIND: TableKind = TableKind::Summary;
    const COLUMNS: &'static [&'static str] = COLUMNS;

    fn from_fields(f: &Fields<'_>) -> std::result::Result<Self, ParseFailure> {
        Ok(SummaryRecord {
            target: SummaryIndex {
                name: f.text(0),
                accession: f.text(1),
            },
            query: SummaryIndex {
                name: f.text(2),
                accession: f.text(3),
            },
            full_sequence: f.score(4),
            best_1_domain: f.score(7),
            domain_numbers: DomainNumbers {
                exp: f.text(10),
                reg: f.int(11)?,
                clu: f.int(12)?,
                ov: f.int(13)?,
                env: f.int(14)?,
                dom: f.int(15)?,
                rep: f.int(16)?,
                inc: f.int(17)?,
            },
            description: f.description(),
        })
    }
}

/// Read every row of a summary table file
pub fn read_tbl<P: AsRef<Path>>(path: P) -> Result<Vec<SummaryRecord>> {
    let file = File::open(path.as_ref())?;
    read_tbl_from(BufReader::new(file))
}

/// Read every row of a summary table from an open stream
pub fn read_tbl_from<R: BufRead>(reader: R) -> Result<Vec<SummaryRecord>> {
    read_rows(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::parse_line;

    const LINE: &str = "item2                -          Octapeptide          PF03373.14   1.2e-07   19.5   3.5   1.2e-07   19.5   3.5   1.0   1   0   0   1   1   1   1 Description one two three";

    #[test]
    fn test_parse_summary_line() {
        let row: SummaryRecord = parse_line(LINE, 1).unwrap();
        assert_eq!(row.target.name, "item2");
        assert_eq!(row.target.accession, "-");
        assert_eq!(row.query.name, "Octapeptide");
        assert_eq!(row.query.accession, "PF03373.14");
        assert_eq!(row.full_sequence.e_value, "1.2e-07");
        assert_eq!(row.best_1_domain.bias, "3.5");
        assert_eq!(row.domain_numbers.exp, "1.0");
        assert_eq!(row.domain_numbers.reg, 1);
        assert_eq!(row.domain_numbers.clu, 0);
        assert_eq!(row.description, "Description one two three");
    }

    #[test]
    fn test_fixed_fields_match_tokens() {
        let row: SummaryRecord = parse_line(LINE, 1).unwrap();
        let tokens: Vec<String> = LINE
            .split_whitespace()
            .take(COLUMNS.len())
            .map(str::to_string)
            .collect();
        assert_eq!(row.fixed_fields(), tokens);
    }

    #[test]
    fn test_non_integer_domain_count() {
        let line = LINE.replace("1.0   1   0", "1.0   x   0");
        let err = parse_line::<SummaryRecord>(&line, 4).unwrap_err();
        assert!(err.to_string().contains("reg"));
    }
}
