/// Input adapters: alignment sources and plain/gzipped text readers
pub mod bam;

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

/// One mapped read as seen by the density builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentRecord {
    /// 0-based leftmost position on the transcript.
    pub start: usize,
    /// Length of the read sequence (SEQ), soft clips included.
    pub query_length: usize,
    /// Raw SAM FLAG.
    pub flags: u16,
}

/// Per-transcript access to the alignments of one sample.
pub trait AlignmentSource {
    /// Records mapped to `reference`; empty when the reference is unknown.
    ///
    /// Sources holding records in memory lend them; sources that read on
    /// demand hand over what they decoded.
    fn records_for(&mut self, reference: &str) -> Result<Cow<'_, [AlignmentRecord]>, Error>;

    /// Names of every reference sequence the source knows about.
    fn known_reference_names(&self) -> BTreeSet<String>;
}

/// Alignment source backed by an in-memory map.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    records: HashMap<String, Vec<AlignmentRecord>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reference: &str, record: AlignmentRecord) {
        self.records
            .entry(reference.to_string())
            .or_default()
            .push(record);
    }
}

impl AlignmentSource for MemorySource {
    fn records_for(&mut self, reference: &str) -> Result<Cow<'_, [AlignmentRecord]>, Error> {
        Ok(Cow::Borrowed(
            self.records.get(reference).map(Vec::as_slice).unwrap_or(&[]),
        ))
    }

    fn known_reference_names(&self) -> BTreeSet<String> {
        self.records.keys().cloned().collect()
    }
}

/// Open a text file, decompressing it on the fly when it ends in `.gz`.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let path_str = path.to_string_lossy();
    let is_gzipped = path_str.ends_with(".gz") || path_str.ends_with(".gzip");

    let file = File::open(path).map_err(|e| Error::io(e, path))?;

    if is_gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
