use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::core::sequence::Sequence;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid genome file: {0}")]
    InvalidFormat(String),
}

/// Longest permitted sequence line.
const MAX_LINE_BASES: usize = 80;

/// Load all genomes from a file, decompressing `.gz` paths transparently.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read and
/// `ParseError::InvalidFormat` for any violation of the format rules.
pub fn load_genome_file(path: &Path) -> Result<Vec<Sequence>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        load_genomes(BufReader::new(GzDecoder::new(file)))
    } else {
        load_genomes(BufReader::new(file))
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Load all genomes from a reader.
///
/// The whole input is rejected on the first malformed line; a partially
/// valid file yields no genomes.
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure and `ParseError::InvalidFormat`
/// for blank lines, missing or empty headers, over-long sequence lines,
/// invalid bases, or records without sequence data.
pub fn load_genomes<R: BufRead>(reader: R) -> Result<Vec<Sequence>, ParseError> {
    let mut genomes = Vec::new();
    let mut name: Option<String> = None;
    let mut bases = String::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;

        if line.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "line {line_no}: blank line"
            )));
        }

        if let Some(header) = line.strip_prefix('>') {
            if header.is_empty() {
                return Err(ParseError::InvalidFormat(format!(
                    "line {line_no}: header with no name"
                )));
            }
            if let Some(previous) = name.take() {
                if bases.is_empty() {
                    return Err(ParseError::InvalidFormat(format!(
                        "line {line_no}: genome '{previous}' has no sequence"
                    )));
                }
                genomes.push(Sequence::new(previous, std::mem::take(&mut bases)));
            }
            name = Some(header.to_string());
        } else {
            if name.is_none() {
                return Err(ParseError::InvalidFormat(
                    "line 1: expected '>' header".to_string(),
                ));
            }
            if line.len() > MAX_LINE_BASES {
                return Err(ParseError::InvalidFormat(format!(
                    "line {line_no}: sequence line longer than {MAX_LINE_BASES} bases"
                )));
            }
            if let Some(bad) = line.chars().find(|&c| !is_base(c)) {
                return Err(ParseError::InvalidFormat(format!(
                    "line {line_no}: invalid base '{bad}'"
                )));
            }
            bases.push_str(&line);
        }
    }

    match name {
        Some(last) if !bases.is_empty() => {
            genomes.push(Sequence::new(last, bases));
            Ok(genomes)
        }
        Some(last) => Err(ParseError::InvalidFormat(format!(
            "genome '{last}' has no sequence"
        ))),
        None => Err(ParseError::InvalidFormat("empty input".to_string())),
    }
}

pub(crate) fn is_base(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | 'N')
}
