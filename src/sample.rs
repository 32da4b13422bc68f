/// Sample resolution from a sample table or the explicit per-sample lists
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::density::ReadSelector;
use crate::error::Error;
use crate::io::open_text;
use crate::params::Parameters;

/// One BAM file with its read selector and output legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSpec {
    pub bam: PathBuf,
    pub selector: ReadSelector,
    pub legend: String,
}

/// Resolve every sample of a run, in the order given on the command line.
pub fn resolve(params: &Parameters) -> Result<Vec<SampleSpec>, Error> {
    match &params.bam_list_file {
        Some(path) => from_list_file(path),
        None => from_lists(
            &params.bam_files,
            params.read_lengths.as_deref().unwrap_or_default(),
            params.read_offsets.as_deref().unwrap_or_default(),
            &params.bam_legends,
        ),
    }
}

/// Parse a sample table: a header line, then
/// `bamFile<TAB>readLengths<TAB>offsets<TAB>legend` per sample.
pub fn from_list_file(path: &Path) -> Result<Vec<SampleSpec>, Error> {
    let reader = open_text(path)?;
    let mut samples = Vec::new();

    for (line_num, line) in reader.lines().enumerate().skip(1) {
        let line = line.map_err(|e| Error::io(e, path))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let &[bam, lengths, offsets, legend] = fields.as_slice() else {
            return Err(Error::SampleList(format!(
                "{}:{}: expected 4 tab-separated columns, found {}",
                path.display(),
                line_num + 1,
                fields.len()
            )));
        };

        samples.push(SampleSpec {
            bam: PathBuf::from(bam),
            selector: ReadSelector::parse(lengths, offsets)?,
            legend: legend.to_string(),
        });
    }

    if samples.is_empty() {
        return Err(Error::SampleList(format!(
            "no samples listed in {}",
            path.display()
        )));
    }

    Ok(samples)
}

/// Zip the explicit lists; lengths and offsets hold one `_`-separated group
/// per BAM file.
pub fn from_lists(
    bams: &[PathBuf],
    lengths: &str,
    offsets: &str,
    legends: &[String],
) -> Result<Vec<SampleSpec>, Error> {
    let lengths: Vec<&str> = lengths.split('_').collect();
    let offsets: Vec<&str> = offsets.split('_').collect();

    if lengths.len() != bams.len() || offsets.len() != bams.len() || legends.len() != bams.len()
    {
        return Err(Error::Parameter(format!(
            "{} BAM files, {} read length groups, {} offset groups and {} legends; one of each is needed per BAM file",
            bams.len(),
            lengths.len(),
            offsets.len(),
            legends.len()
        )));
    }

    bams.iter()
        .zip(lengths)
        .zip(offsets)
        .zip(legends)
        .map(|(((bam, lengths), offsets), legend)| -> Result<SampleSpec, Error> {
            Ok(SampleSpec {
                bam: bam.clone(),
                selector: ReadSelector::parse(lengths, offsets)?,
                legend: legend.clone(),
            })
        })
        .collect()
}
