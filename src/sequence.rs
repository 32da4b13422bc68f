use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::Error;
use crate::io::open_text;

/// IUPAC ambiguity codes (and `I`, `X`) that disqualify a transcript.
pub const AMBIGUOUS_BASES: &[u8] = b"IKMRSWYBDHVNX";

/// Transcript sequences keyed by transcript ID.
#[derive(Debug, Default, Clone)]
pub struct SequenceTable {
    sequences: HashMap<String, Vec<u8>>,
}

impl SequenceTable {
    /// Parse a transcript FASTA file (plain or gzipped).
    ///
    /// - ID is the header text up to the first whitespace
    /// - Sequence lines are concatenated and upper-cased
    /// - Records containing an ambiguous base are dropped with a warning
    pub fn from_fasta(path: &Path) -> Result<Self, Error> {
        let reader = open_text(path)?;
        let mut table = Self::default();

        let mut current_name: Option<String> = None;
        let mut current_seq: Vec<u8> = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| Error::io(e, path))?;
            let line = line.trim_end();

            if line.is_empty() {
                continue;
            }

            if let Some(stripped) = line.strip_prefix('>') {
                if let Some(name) = current_name.take() {
                    table.insert_checked(name, std::mem::take(&mut current_seq));
                }

                let name = stripped
                    .split_whitespace()
                    .next()
                    .ok_or_else(|| {
                        Error::Fasta(format!(
                            "empty transcript name at {}:{}",
                            path.display(),
                            line_num + 1
                        ))
                    })?
                    .to_string();

                current_name = Some(name);
            } else {
                if current_name.is_none() {
                    return Err(Error::Fasta(format!(
                        "sequence data before first header at {}:{}",
                        path.display(),
                        line_num + 1
                    )));
                }

                current_seq.extend(
                    line.bytes()
                        .filter(|b| !b.is_ascii_whitespace())
                        .map(|b| b.to_ascii_uppercase()),
                );
            }
        }

        if let Some(name) = current_name {
            table.insert_checked(name, current_seq);
        }

        log::info!(
            "Loaded {} transcript sequences from {}",
            table.len(),
            path.display()
        );

        Ok(table)
    }

    /// Store a sequence unless it carries an ambiguous base.
    ///
    /// Returns whether the sequence was stored.
    pub fn insert_checked(&mut self, name: String, sequence: Vec<u8>) -> bool {
        if let Some(&base) = sequence.iter().find(|&&b| AMBIGUOUS_BASES.contains(&b)) {
            log::warn!(
                "{} filtered--There is a ambiguous nucleotide {} in your sequence",
                name,
                base as char
            );
            return false;
        }
        self.sequences.insert(name, sequence);
        true
    }

    pub fn get(&self, transcript_id: &str) -> Option<&[u8]> {
        self.sequences.get(transcript_id).map(Vec::as_slice)
    }

    pub fn contains(&self, transcript_id: &str) -> bool {
        self.sequences.contains_key(transcript_id)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
