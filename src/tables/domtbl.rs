//! Per-domain table (`--domtblout`)

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
    "target_length",
    "query_name",
    "query_accession",
    "query_length",
    "seq_e_value",
    "seq_score",
    "seq_bias",
    "dom_id",
    "dom_count",
    "c_value",
    "i_value",
    "dom_score",
    "dom_bias",
    "hmm_from",
    "hmm_to",
    "ali_from",
    "ali_to",
    "env_from",
    "env_to",
    "acc",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainIndex {
    pub name: String,
    pub accession: String,
    pub length: u64,
}

/// Scores of this particular domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainScore {
    /// 1-based number of this domain
    pub id: u32,
    /// How many domains the target/query pair has
    pub size: u32,
    pub c_value: String,
    pub i_value: String,
    pub score: String,
    pub bias: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCoord {
    pub start: u64,
    pub stop: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub target: DomainIndex,
    pub query: DomainIndex,
    pub full_sequence: Score,
    pub domain: DomainScore,
    pub hmm_coord: DomainCoord,
    pub ali_coord: DomainCoord,
    pub env_coord: DomainCoord,
    /// Mean posterior probability of aligned residues
    pub acc: String,
    pub description: String,
}

impl DomainRecord {
    /// The fixed columns rendered back to text, in file order
    pub fn fixed_fields(&self) -> Vec<String> {
        let d = &self.domain;
        let mut fields = vec![
            self.target.name.clone(),
            self.target.accession.clone(),
            self.target.length.to_string(),
            self.query.name.clone(),
            self.query.accession.clone(),
            self.query.length.to_string(),
            self.full_sequence.e_value.clone(),
            self.full_sequence.score.clone(),
            self.full_sequence.bias.clone(),
            d.id.to_string(),
            d.size.to_string(),
            d.c_value.clone(),
            d.i_value.clone(),
            d.score.clone(),
            d.bias.clone(),
        ];
        for coord in [self.hmm_coord, self.ali_coord, self.env_coord] {
            fields.push(coord.start.to_string());
            fields.push(coord.stop.to_string());
        }
        fields.push(self.acc.clone());
        fields
    }
}

fn coord(f: &Fields<'_>, start: usize) -> std::result::Result<DomainCoord, ParseFailure> {
    Ok(DomainCoord {
        start: f.int(start)?,
        stop: f.int(start + 1)?,
    })
}

impl TableRow for DomainRecord {
    const KIND: TableKind = TableKind::Domain;
    const COLUMNS: &'static [&'static str] = COLUMNS;

    fn from_fields(f: &Fields<'_>) -> std::result::Result<Self, ParseFailure> {
        Ok(DomainRecord {
            target: DomainIndex {
                name: f.text(0),
                accession: f.text(1),
                length: f.int(2)?,
            },
            query: DomainIndex {
                name: f.text(3),
                accession: f.text(4),
                length: f.int(5)?,
            },
            full_sequence: f.score(6),
            domain: DomainScore {
                id: f.int(9)?,
                size: f.int(10)?,
                c_value: f.text(11),
                i_value: f.text(12),
                score: f.text(13),
                bias: f.text(14),
            },
            hmm_coord: coord(f, 15)?,
            ali_coord: coord(f, 17)?,
            env_coord: coord(f, 19)?,
            acc: f.text(21),
            description: f.description(),
        })
    }
}

/// Read every row of a domain table file
pub fn read_domtbl<P: AsRef<Path>>(path: P) -> Result<Vec<DomainRecord>> {
    let file = File::open(path.as_ref())?;
    read_domtbl_from(BufReader::new(file))
}

/// Read every row of a domain table from an open stream
pub fn read_domtbl_from<R: BufRead>(reader: R) -> Result<Vec<DomainRecord>> {
    read_rows(reader)
}
