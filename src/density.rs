/// Per-transcript P-site density from alignment records
///
/// A read is placed at its 5' position, shifted by the offset configured for
/// its length. Reads on the reverse strand (FLAG 16, or 272 when secondary)
/// never contribute.
use log::warn;

use crate::error::Error;
use crate::io::AlignmentRecord;

/// FLAG values of reads that are not on the transcript strand.
const REVERSE_FLAGS: [u16; 2] = [16, 272];

/// Which reads are counted and where they land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadSelector {
    /// Every forward read, at its raw 5' position.
    All,
    /// `(read_length, offset)` pairs; a read counts once per matching pair.
    Offsets(Vec<(usize, i64)>),
}

impl ReadSelector {
    /// Parse a selector from its comma-separated length and offset lists.
    ///
    /// `ALL` (any case) in the length list selects every read; the offsets
    /// are then ignored.
    pub fn parse(lengths: &str, offsets: &str) -> Result<Self, Error> {
        if lengths.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let lengths = split_values::<usize>(lengths, "read length")?;
        let offsets = split_values::<i64>(offsets, "offset")?;

        if lengths.len() != offsets.len() {
            return Err(Error::Parameter(format!(
                "{} read lengths but {} offsets",
                lengths.len(),
                offsets.len()
            )));
        }

        Ok(Self::Offsets(lengths.into_iter().zip(offsets).collect()))
    }
}

impl std::fmt::Display for ReadSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Offsets(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(length, offset)| format!("{length}:{offset}"))
                    .collect();
                write!(f, "{}", pairs.join(","))
            }
        }
    }
}

fn split_values<T: std::str::FromStr>(raw: &str, what: &str) -> Result<Vec<T>, Error> {
    raw.split(',')
        .map(|item| {
            item.trim()
                .parse::<T>()
                .map_err(|_| Error::Parameter(format!("invalid {what}: '{item}'")))
        })
        .collect()
}

/// Density of one transcript in one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    /// Reads per nucleotide, indexed by 0-based transcript position.
    pub counts: Vec<u64>,
    /// Reads per CDS codon (sum of the three frames at each codon).
    pub codon_counts: Vec<u64>,
    /// Reads on frame 0, 1 and 2 of the CDS.
    pub frame_counts: [u64; 3],
    /// Reads placed anywhere on the transcript.
    pub total_reads: u64,
    /// Reads placed on the CDS.
    pub cds_reads: u64,
}

/// Build the density vector for one transcript.
///
/// `start` and `stop` are the 0-based first bases of the start and stop
/// codons; the CDS is `[start, stop + 3)`, clamped to the transcript.
/// A P-site outside `[0, transcript_length)` is logged and dropped, and is
/// not part of `total_reads`.
pub fn build_density(
    name: &str,
    records: &[AlignmentRecord],
    selector: &ReadSelector,
    transcript_length: usize,
    start: usize,
    stop: usize,
) -> DensityProfile {
    let mut counts = vec![0u64; transcript_length];
    let mut total_reads = 0u64;

    let mut place = |position: i64, counts: &mut Vec<u64>| {
        if position >= 0 && (position as usize) < counts.len() {
            counts[position as usize] += 1;
            total_reads += 1;
        } else {
            warn!(
                "P-site {} outside transcript {} (length {}); read skipped",
                position, name, transcript_length
            );
        }
    };

    for record in records {
        if REVERSE_FLAGS.contains(&record.flags) {
            continue;
        }

        match selector {
            ReadSelector::All => place(record.start as i64, &mut counts),
            ReadSelector::Offsets(pairs) => {
                for &(length, offset) in pairs {
                    if record.query_length == length {
                        place(record.start as i64 + offset, &mut counts);
                    }
                }
            }
        }
    }

    let (codon_counts, frame_counts) = frame_decompose(&counts, start, stop);
    let cds_reads = frame_counts.iter().sum();

    DensityProfile {
        counts,
        codon_counts,
        frame_counts,
        total_reads,
        cds_reads,
    }
}

/// Split the CDS `[start, stop + 3)` into codons and frames.
fn frame_decompose(counts: &[u64], start: usize, stop: usize) -> (Vec<u64>, [u64; 3]) {
    let end = (stop + 3).min(counts.len());
    if start >= end {
        return (Vec::new(), [0; 3]);
    }

    let mut frames = [0u64; 3];
    let codons: Vec<u64> = counts[start..end]
        .chunks(3)
        .map(|codon| {
            for (frame, &n) in codon.iter().enumerate() {
                frames[frame] += n;
            }
            codon.iter().sum::<u64>()
        })
        .collect();

    (codons, frames)
}
