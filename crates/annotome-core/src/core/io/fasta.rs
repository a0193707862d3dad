use crate::core::diagnostics::{Diagnostic, Diagnostics};
use crate::core::models::error::ProteomeError;
use crate::core::models::protein::Protein;
use crate::core::models::proteome::Proteome;
use phf::{Map, Set, phf_map, phf_set};
use serde::Deserialize;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

static CANONICAL_RESIDUES: Set<char> = phf_set! {
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'Y',
};

/// Replacement text for non-canonical residues under [`InvalidSequenceAction::Convert`].
static RESIDUE_CONVERSIONS: Map<char, &'static str> = phf_map! {
    'B' => "N",
    'U' => "C",
    'X' => "G",
    'Z' => "S",
    '*' => "",
    '-' => "",
};

/// How the protein unique ID is derived from a FASTA record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierScheme {
    /// The first whitespace-separated token of the header.
    #[default]
    FirstToken,
    /// The second `|`-separated field of a UniProt header (`sp|P12345|NAME_HUMAN ...`).
    UniprotAccession,
    /// The 1-based index of the record in the file.
    Sequential,
}

/// What to do with a sequence containing residues outside the 20 canonical amino acids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidSequenceAction {
    #[default]
    Fail,
    Ignore,
    Remove,
    Convert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FastaOptions {
    pub identifier: IdentifierScheme,
    pub invalid_sequence_action: InvalidSequenceAction,
}

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("File I/O error for '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Sequence data on line {line} appears before any '>' header")]
    SequenceBeforeHeader { line: usize },

    #[error("Header on line {line} has no identifier")]
    EmptyIdentifier { line: usize },

    #[error("Header '{header}' has no UniProt accession (expected 'db|ACCESSION|...')")]
    MissingAccession { header: String },

    #[error("Protein '{unique_id}' has an empty sequence")]
    EmptySequence { unique_id: String },

    #[error("Protein '{unique_id}' has invalid residue '{residue}' at position {position}")]
    InvalidResidue {
        unique_id: String,
        residue: char,
        position: usize,
    },

    #[error(transparent)]
    Proteome(#[from] ProteomeError),
}

struct FastaRecord<'a> {
    header: &'a str,
    line: usize,
    sequence: String,
}

/// Builds a [`Proteome`] from a FASTA file.
///
/// # Return
///
/// Returns the proteome, in file order, and a diagnostic for every protein
/// dropped under [`InvalidSequenceAction::Remove`].
///
/// # Errors
///
/// Returns [`FastaError`] if the file cannot be read or is malformed, if two
/// records share an identifier, or if a sequence holds residues the chosen
/// action cannot handle.
pub fn read_fasta<P: AsRef<Path>>(
    path: P,
    options: &FastaOptions,
) -> Result<(Proteome, Diagnostics), FastaError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| FastaError::File {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let (proteome, diagnostics) = read_fasta_from_str(&content, options)?;
    info!(
        path = %path.display(),
        proteins = proteome.len(),
        "Read proteome from FASTA"
    );
    Ok((proteome, diagnostics))
}

/// Builds a [`Proteome`] from FASTA text. See [`read_fasta`].
pub fn read_fasta_from_str(
    content: &str,
    options: &FastaOptions,
) -> Result<(Proteome, Diagnostics), FastaError> {
    let mut proteome = Proteome::new();
    let mut diagnostics = Diagnostics::new();

    for (index, record) in split_records(content)?.into_iter().enumerate() {
        let unique_id = identifier(&record, index, options.identifier)?;
        if record.sequence.is_empty() {
            return Err(FastaError::EmptySequence { unique_id });
        }

        let sequence = match first_invalid_residue(&record.sequence) {
            None => record.sequence,
            Some((position, residue)) => match options.invalid_sequence_action {
                InvalidSequenceAction::Fail => {
                    return Err(FastaError::InvalidResidue {
                        unique_id,
                        residue,
                        position,
                    });
                }
                InvalidSequenceAction::Ignore => record.sequence,
                InvalidSequenceAction::Remove => {
                    diagnostics.push(Diagnostic::DroppedProtein {
                        unique_id,
                        reason: format!("invalid residue '{}' at position {}", residue, position),
                    });
                    continue;
                }
                InvalidSequenceAction::Convert => convert_sequence(&record.sequence)
                    .map_err(|(position, residue)| FastaError::InvalidResidue {
                        unique_id: unique_id.clone(),
                        residue,
                        position,
                    })?,
            },
        };

        debug!(%unique_id, length = sequence.len(), "Adding protein");
        proteome.add_protein(Protein::new(&unique_id, record.header, &sequence))?;
    }

    Ok((proteome, diagnostics))
}

fn split_records(content: &str) -> Result<Vec<FastaRecord<'_>>, FastaError> {
    let mut records: Vec<FastaRecord<'_>> = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line_num = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            records.push(FastaRecord {
                header: header.trim(),
                line: line_num,
                sequence: String::new(),
            });
            continue;
        }
        match records.last_mut() {
            Some(record) => record.sequence.push_str(&line.to_ascii_uppercase()),
            None => return Err(FastaError::SequenceBeforeHeader { line: line_num }),
        }
    }
    Ok(records)
}

fn identifier(
    record: &FastaRecord<'_>,
    index: usize,
    scheme: IdentifierScheme,
) -> Result<String, FastaError> {
    match scheme {
        IdentifierScheme::FirstToken => record
            .header
            .split_whitespace()
            .next()
            .map(str::to_string)
            .ok_or(FastaError::EmptyIdentifier { line: record.line }),
        IdentifierScheme::UniprotAccession => record
            .header
            .split('|')
            .nth(1)
            .map(str::trim)
            .filter(|accession| !accession.is_empty())
            .map(str::to_string)
            .ok_or_else(|| FastaError::MissingAccession {
                header: record.header.to_string(),
            }),
        IdentifierScheme::Sequential => Ok((index + 1).to_string()),
    }
}

/// 1-based position and value of the first non-canonical residue.
fn first_invalid_residue(sequence: &str) -> Option<(usize, char)> {
    sequence
        .chars()
        .enumerate()
        .find(|(_, residue)| !CANONICAL_RESIDUES.contains(residue))
        .map(|(i, residue)| (i + 1, residue))
}

fn convert_sequence(sequence: &str) -> Result<String, (usize, char)> {
    let mut converted = String::with_capacity(sequence.len());
    for (i, residue) in sequence.chars().enumerate() {
        if CANONICAL_RESIDUES.contains(&residue) {
            converted.push(residue);
        } else if let Some(replacement) = RESIDUE_CONVERSIONS.get(&residue) {
            converted.push_str(replacement);
        } else {
            return Err((i + 1, residue));
        }
    }
    Ok(converted)
}
