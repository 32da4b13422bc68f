/// Transcript coordinate table parsing
///
/// Tab-separated, one transcript per line (header line starting with
/// `chrom` is skipped). Columns used:
/// 0. chromosome
/// 1. transcript ID
/// 3. gene ID
/// 4. gene name
/// 8. start codon (1-based, first base)
/// 9. stop codon (1-based, last base)
/// 10. CDS length
/// 13. transcript length
use crate::error::Error;
use crate::io::open_text;
use crate::params::IdType;
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use std::path::Path;

const MIN_FIELDS: usize = 14;

/// One annotated transcript, with codon coordinates converted to 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub transcript_id: String,
    pub gene_id: String,
    pub gene_name: String,
    pub chrom: String,
    pub length: usize,
    /// First base of the start codon (0-based).
    pub start_codon: usize,
    /// First base of the stop codon (0-based).
    pub stop_codon: usize,
    pub cds_length: usize,
}

/// Annotated transcripts in file order, with lookups by transcript, gene ID
/// and gene name.
#[derive(Debug, Default)]
pub struct AnnotationTable {
    transcripts: Vec<TranscriptRecord>,
    by_transcript: HashMap<String, usize>,
    by_gene_id: HashMap<String, usize>,
    by_gene_name: HashMap<String, usize>,
}

impl AnnotationTable {
    /// Parse a coordinate table.
    ///
    /// Malformed lines are skipped with a warning; an unreadable file is an
    /// error.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let reader = open_text(path)?;
        let mut table = Self::default();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::io(e, path))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with("chrom\t") || line == "chrom" {
                continue;
            }

            match parse_coordinate_line(line) {
                Ok(record) => table.insert(record),
                Err(e) => {
                    log::warn!("Skipping coordinate line {}: {}", line_num + 1, e);
                }
            }
        }

        log::info!(
            "{} transcripts will be used in the follow analysis.",
            table.len()
        );

        Ok(table)
    }

    /// Add a transcript; a repeated transcript ID replaces the earlier one.
    pub fn insert(&mut self, record: TranscriptRecord) {
        let idx = match self.by_transcript.get(&record.transcript_id) {
            Some(&idx) => {
                self.transcripts[idx] = record;
                idx
            }
            None => {
                self.transcripts.push(record);
                self.transcripts.len() - 1
            }
        };

        let record = &self.transcripts[idx];
        self.by_transcript
            .insert(record.transcript_id.clone(), idx);
        self.by_gene_id.insert(record.gene_id.clone(), idx);
        self.by_gene_name.insert(record.gene_name.clone(), idx);
    }

    pub fn get(&self, transcript_id: &str) -> Option<&TranscriptRecord> {
        self.by_transcript
            .get(transcript_id)
            .map(|&idx| &self.transcripts[idx])
    }

    /// All transcripts in file order.
    pub fn iter(&self) -> impl Iterator<Item = &TranscriptRecord> {
        self.transcripts.iter()
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    /// Translate an identifier of the given namespace to a transcript ID.
    pub fn resolve(&self, id: &str, id_type: IdType) -> Option<&str> {
        let idx = match id_type {
            IdType::TranscriptId => self.by_transcript.get(id),
            IdType::GeneId => self.by_gene_id.get(id),
            IdType::GeneName => self.by_gene_name.get(id),
        }?;
        Some(self.transcripts[*idx].transcript_id.as_str())
    }

    /// Transcripts named by a selection table (header line, IDs in the first
    /// column), restricted to annotated transcripts.
    pub fn select_from_path(
        &self,
        path: &Path,
        id_type: IdType,
    ) -> Result<BTreeSet<String>, Error> {
        let reader = open_text(path)?;
        let mut selected = BTreeSet::new();

        for line in reader.lines().skip(1) {
            let line = line.map_err(|e| Error::io(e, path))?;
            let Some(id) = line.split('\t').next().map(str::trim) else {
                continue;
            };
            if id.is_empty() {
                continue;
            }
            if let Some(transcript_id) = self.resolve(id, id_type) {
                selected.insert(transcript_id.to_string());
            }
        }

        log::info!(
            "There are {} transcripts ({}) from {} used for following analysis.",
            selected.len(),
            id_type,
            path.display()
        );

        Ok(selected)
    }

    /// Every annotated transcript ID.
    pub fn all_transcripts(&self) -> BTreeSet<String> {
        self.by_transcript.keys().cloned().collect()
    }
}

/// Parse a single coordinate line.
fn parse_coordinate_line(line: &str) -> Result<TranscriptRecord, Error> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() < MIN_FIELDS {
        return Err(Error::Annotation(format!(
            "line has {} fields, expected at least {}",
            fields.len(),
            MIN_FIELDS
        )));
    }

    let number = |idx: usize, what: &str| -> Result<usize, Error> {
        fields[idx]
            .trim()
            .parse::<usize>()
            .map_err(|e| Error::Annotation(format!("invalid {}: {}", what, e)))
    };

    let start_codon = number(8, "start codon")?;
    let stop_codon = number(9, "stop codon")?;

    if start_codon == 0 || stop_codon < 3 {
        return Err(Error::Annotation(format!(
            "codon coordinates {}..{} are not 1-based",
            start_codon, stop_codon
        )));
    }

    let start_codon = start_codon - 1;
    let stop_codon = stop_codon - 3;

    if stop_codon <= start_codon {
        return Err(Error::Annotation(format!(
            "stop codon {} is not downstream of start codon {}",
            stop_codon, start_codon
        )));
    }

    Ok(TranscriptRecord {
        chrom: fields[0].to_string(),
        transcript_id: fields[1].to_string(),
        gene_id: fields[3].to_string(),
        gene_name: fields[4].to_string(),
        start_codon,
        stop_codon,
        cds_length: number(10, "CDS length")?,
        length: number(13, "transcript length")?,
    })
}
