/// BAM alignment source with noodles (indexed queries, in-memory fallback)
use crate::error::Error;
use crate::io::{AlignmentRecord, AlignmentSource};
use noodles::bam;
use noodles::core::{region::Interval, Position, Region};
use noodles::sam;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};

/// Per-transcript query against an opened, indexed BAM.
type QueryFn = Box<dyn FnMut(&str) -> Result<Vec<AlignmentRecord>, Error>>;

enum Backend {
    /// Region queries through the `.bai`/`.csi` index next to the BAM.
    Indexed(QueryFn),
    /// Every placed record, grouped by reference name.
    Loaded(HashMap<String, Vec<AlignmentRecord>>),
}

/// Alignments of one BAM file, served per reference (transcript) name.
///
/// With an index, each lookup queries the whole reference span and only
/// that transcript's records are decoded. Without one, the file is decoded
/// once and lookups borrow from the grouped records.
/// Unmapped records and records without a position are dropped.
pub struct BamSource {
    references: Vec<String>,
    backend: Backend,
}

impl BamSource {
    /// Open a BAM file
    ///
    /// # Arguments
    /// * `path` - Path to the BAM file; `<path>.bai` or `<path>.csi` is used
    ///   when present
    pub fn open(path: &Path) -> Result<Self, Error> {
        match index_path(path) {
            Some(index) => {
                log::info!("Querying {} through {}", path.display(), index.display());
                Self::open_indexed(path)
            }
            None => {
                log::info!("No index for {}; loading all records", path.display());
                Self::open_loaded(path)
            }
        }
    }

    /// Open through the associated index; records are read on demand.
    pub fn open_indexed(path: &Path) -> Result<Self, Error> {
        let mut reader = bam::io::indexed_reader::Builder::default()
            .build_from_path(path)
            .map_err(|e| Error::io(e, path))?;
        let header = reader.read_header().map_err(|e| Error::io(e, path))?;
        let references = reference_names(&header);

        let path = path.to_path_buf();
        let query = move |name: &str| -> Result<Vec<AlignmentRecord>, Error> {
            let Some(reference) = header.reference_sequences().get(name.as_bytes()) else {
                return Ok(Vec::new());
            };
            let end = Position::new(reference.length().get()).ok_or_else(|| {
                Error::Alignment(format!("reference {} has no length", name))
            })?;
            let region = Region::new(name, Interval::from(Position::MIN..=end));

            let mut records = Vec::new();
            let query = reader
                .query(&header, &region)
                .map_err(|e| Error::io(e, &path))?;
            for result in query {
                let record = result.map_err(|e| Error::io(e, &path))?;
                if let Some((_, placed)) = decode(&record).map_err(|e| Error::io(e, &path))? {
                    records.push(placed);
                }
            }
            Ok(records)
        };

        Ok(Self {
            references,
            backend: Backend::Indexed(Box::new(query)),
        })
    }

    /// Decode the whole file once and group records by reference.
    pub fn open_loaded(path: &Path) -> Result<Self, Error> {
        let mut reader = bam::io::reader::Builder::default()
            .build_from_path(path)
            .map_err(|e| Error::io(e, path))?;
        let header = reader.read_header().map_err(|e| Error::io(e, path))?;
        let references = reference_names(&header);

        let mut records: HashMap<String, Vec<AlignmentRecord>> = HashMap::new();
        let mut n_records = 0u64;

        for result in reader.records() {
            let record = result.map_err(|e| Error::io(e, path))?;
            let Some((reference_id, placed)) = decode(&record).map_err(|e| Error::io(e, path))?
            else {
                continue;
            };

            let name = references.get(reference_id).ok_or_else(|| {
                Error::Alignment(format!(
                    "reference id {} not in header of {}",
                    reference_id,
                    path.display()
                ))
            })?;

            records.entry(name.clone()).or_default().push(placed);
            n_records += 1;
        }

        log::info!(
            "Loaded {} placed records on {} references from {}",
            n_records,
            references.len(),
            path.display()
        );

        Ok(Self {
            references,
            backend: Backend::Loaded(records),
        })
    }
}

impl AlignmentSource for BamSource {
    fn records_for(&mut self, reference: &str) -> Result<Cow<'_, [AlignmentRecord]>, Error> {
        match &mut self.backend {
            Backend::Indexed(query) => (*query)(reference).map(Cow::Owned),
            Backend::Loaded(records) => Ok(Cow::Borrowed(
                records.get(reference).map(Vec::as_slice).unwrap_or(&[]),
            )),
        }
    }

    fn known_reference_names(&self) -> BTreeSet<String> {
        self.references.iter().cloned().collect()
    }
}

/// `<path>.bai` or `<path>.csi`, whichever exists first.
fn index_path(path: &Path) -> Option<PathBuf> {
    ["bai", "csi"]
        .iter()
        .map(|ext| {
            let mut index = path.as_os_str().to_owned();
            index.push(".");
            index.push(ext);
            PathBuf::from(index)
        })
        .find(|index| index.exists())
}

fn reference_names(header: &sam::Header) -> Vec<String> {
    header
        .reference_sequences()
        .keys()
        .map(|name| name.to_string())
        .collect()
}

/// Reference ID and compact form of a placed record.
fn decode(record: &bam::Record) -> io::Result<Option<(usize, AlignmentRecord)>> {
    let (Some(reference_id), Some(start)) =
        (record.reference_sequence_id(), record.alignment_start())
    else {
        return Ok(None);
    };

    Ok(Some((
        reference_id?,
        AlignmentRecord {
            start: usize::from(start?) - 1,
            query_length: record.sequence().len(),
            flags: record.flags().bits(),
        },
    )))
}
