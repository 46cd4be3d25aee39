use crate::bio::sequence::Sequence;
use crate::HmmerError;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{line_ending, not_line_ending},
    combinator::{map, opt},
    sequence::preceded,
    IResult,
};
use std::io::Write;

/// Parse a FASTA header line
fn parse_header(input: &[u8]) -> IResult<&[u8], (&str, Option<&str>)> {
    let (input, _) = tag(b">")(input)?;
    let (input, id) = map(
        take_till(|c: u8| c == b' ' || c == b'\t' || c == b'\n' || c == b'\r'),
        |s| std::str::from_utf8(s).unwrap_or(""),
    )(input)?;
    let (input, description) = opt(preceded(
        tag(b" "),
        map(not_line_ending, |s| std::str::from_utf8(s).unwrap_or("")),
    ))(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((input, (id, description)))
}

/// Parse sequence lines until next header or EOF
fn parse_sequence(input: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let mut sequence = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() && remaining[0] != b'>' {
        let (rest, line) =
            take_till::<_, _, nom::error::Error<_>>(|c: u8| c == b'\n' || c == b'\r')(remaining)?;
        let (rest, _) = opt(line_ending)(rest)?;

        for &c in line {
            if !c.is_ascii_whitespace() {
                sequence.push(c.to_ascii_uppercase());
            }
        }

        // A lone '\r' is neither content nor a full line ending
        remaining = if rest.len() == remaining.len() {
            &rest[1..]
        } else {
            rest
        };
    }

    Ok((remaining, sequence))
}

/// Parse FASTA from bytes
pub fn parse_fasta_from_bytes(data: &[u8]) -> Result<Vec<Sequence>, HmmerError> {
    let mut sequences = Vec::new();
    let mut remaining = data;

    loop {
        while !remaining.is_empty() && remaining[0].is_ascii_whitespace() {
            remaining = &remaining[1..];
        }

        if remaining.is_empty() {
            break;
        }

        if remaining[0] != b'>' {
            return Err(HmmerError::Fasta(format!(
                "record does not start with '>': {:?}",
                String::from_utf8_lossy(&remaining[..remaining.len().min(40)])
            )));
        }

        let (rest, (id, description)) = parse_header(remaining)
            .map_err(|e| HmmerError::Fasta(format!("bad header: {:?}", e)))?;
        let (rest, seq_data) = parse_sequence(rest)
            .map_err(|e| HmmerError::Fasta(format!("bad sequence: {:?}", e)))?;

        let mut seq = Sequence::new(id.to_string(), seq_data);
        if let Some(desc) = description {
            seq = seq.with_description(desc.to_string());
        }
        sequences.push(seq);

        remaining = rest;
    }

    Ok(sequences)
}

/// Write sequences to any writer in 80-column lines
pub fn write_fasta_to_writer<W: Write>(writer: &mut W, sequences: &[Sequence]) -> Result<(), HmmerError> {
    for seq in sequences {
        writeln!(writer, "{}", seq.header())?;
        for chunk in seq.sequence.chunks(80) {
            writeln!(writer, "{}", String::from_utf8_lossy(chunk))?;
        }
    }
    Ok(())
}
