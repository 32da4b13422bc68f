use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Filter mode enum
// ---------------------------------------------------------------------------

/// How the CDS read-count threshold (`--minimum_cds_counts`) is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Raw reads on the CDS.
    Counts,
    /// Depth- and length-normalized CDS reads.
    Rpkm,
}

impl std::str::FromStr for FilterMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counts" => Ok(Self::Counts),
            "RPKM" => Ok(Self::Rpkm),
            _ => Err(format!(
                "unknown filter mode '{s}'; expected 'counts' or 'RPKM'"
            )),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Counts => write!(f, "counts"),
            Self::Rpkm => write!(f, "RPKM"),
        }
    }
}

// ---------------------------------------------------------------------------
// Region enum
// ---------------------------------------------------------------------------

/// Transcript region scanned for motifs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMode {
    Cds,
    FivePrimeUtr,
}

impl std::str::FromStr for RegionMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("CDS") {
            Ok(Self::Cds)
        } else if s.eq_ignore_ascii_case("5UTR") {
            Ok(Self::FivePrimeUtr)
        } else {
            Err(format!(
                "unknown region type '{s}'; expected 'CDS' or '5UTR'"
            ))
        }
    }
}

impl std::fmt::Display for RegionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cds => write!(f, "CDS"),
            Self::FivePrimeUtr => write!(f, "5UTR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection ID type
// ---------------------------------------------------------------------------

/// Identifier namespace of the `--select_trans_list` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdType {
    #[default]
    TranscriptId,
    GeneId,
    GeneName,
}

impl std::str::FromStr for IdType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transcript_id" => Ok(Self::TranscriptId),
            "gene_id" => Ok(Self::GeneId),
            "gene_name" | "gene_symbol" => Ok(Self::GeneName),
            _ => Err(format!(
                "unknown id type '{s}'; expected transcript_id, gene_id or gene_name"
            )),
        }
    }
}

impl std::fmt::Display for IdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TranscriptId => write!(f, "transcript_id"),
            Self::GeneId => write!(f, "gene_id"),
            Self::GeneName => write!(f, "gene_name"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameters struct
// ---------------------------------------------------------------------------

/// Command-line parameters.
///
/// Samples come either from a sample table (`-f`) or from the parallel
/// `-i/-r/-s/-t` lists; the two forms are mutually exclusive.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ribo-purine",
    about = "Ribosome density around poly-purine motifs from Ribo-seq alignments",
    version
)]
pub struct Parameters {
    // ── Samples ─────────────────────────────────────────────────────────
    /// Sample table with a header and four tab-separated columns:
    /// bamFile, readLengths, offsets, legend
    #[arg(short = 'f', long = "bamListFile")]
    pub bam_list_file: Option<PathBuf>,

    /// Comma-separated BAM files
    #[arg(short = 'i', long = "input", value_delimiter = ',')]
    pub bam_files: Vec<PathBuf>,

    /// Read lengths per sample, samples split by '_' (e.g. '28,29_ALL')
    #[arg(short = 'r', long = "specific_reads_length")]
    pub read_lengths: Option<String>,

    /// Offsets per sample, same layout as --specific_reads_length
    #[arg(short = 's', long = "offset", allow_hyphen_values = true)]
    pub read_offsets: Option<String>,

    /// Comma-separated legend of each BAM file
    #[arg(short = 't', long = "bam_file_legend", value_delimiter = ',')]
    pub bam_legends: Vec<String>,

    // ── Annotation ──────────────────────────────────────────────────────
    /// Transcript coordinate table with start and stop codon positions
    #[arg(short = 'c', long = "coordinateFile")]
    pub coordinate_file: PathBuf,

    /// Transcript sequences (FASTA, optionally gzipped)
    #[arg(short = 'F', long = "transcript_fasta")]
    pub transcript_fasta: PathBuf,

    /// Optional table of selected IDs (header line, IDs in the first column)
    #[arg(short = 'S', long = "select_trans_list")]
    pub select_trans_list: Option<PathBuf>,

    /// ID namespace of --select_trans_list: transcript_id, gene_id or gene_name
    #[arg(long = "id-type", default_value = "transcript_id")]
    pub id_type: IdType,

    // ── Output ──────────────────────────────────────────────────────────
    /// Prefix of output files
    #[arg(short = 'o', long = "output_prefix")]
    pub output_prefix: String,

    // ── Filters ─────────────────────────────────────────────────────────
    /// Read-count filter mode: counts or RPKM
    #[arg(short = 'M', long = "filter_mode", default_value = "counts")]
    pub filter_mode: FilterMode,

    /// Minimum CDS length in codons
    #[arg(short = 'l', long = "minimum_cds_codon", default_value_t = 150)]
    pub min_cds_codon: usize,

    /// Minimum CDS reads (or RPKM with --filter_mode RPKM)
    #[arg(short = 'n', long = "minimum_cds_counts", default_value_t = 64.0)]
    pub min_cds_counts: f64,

    /// Minimum raw reads inside a window for an occurrence to be kept
    #[arg(long = "min-window-reads", default_value_t = 16)]
    pub min_window_reads: u64,

    // ── Window and motif ────────────────────────────────────────────────
    /// Window size upstream of the motif start (nt)
    #[arg(short = 'u', long = "upstream_codon", default_value_t = 0)]
    pub upstream: usize,

    /// Window size downstream of the motif start (nt)
    #[arg(short = 'd', long = "downstream_codon", default_value_t = 500)]
    pub downstream: usize,

    /// Motif length
    #[arg(long = "kmer", default_value_t = 4)]
    pub kmer: usize,

    /// Region to scan: CDS or 5UTR
    #[arg(long = "type", default_value = "CDS")]
    pub region: RegionMode,

    /// Motif alphabet; 'AG' selects poly-purine motifs
    #[arg(long = "base", default_value = "AG")]
    pub base: String,
}

impl Parameters {
    /// Output file for one sample: `{prefix}_{legend}_poly{base}_{kmer}_mer.txt`.
    pub fn output_path(&self, legend: &str) -> PathBuf {
        PathBuf::from(format!(
            "{}_{}_poly{}_{}_mer.txt",
            self.output_prefix, legend, self.base, self.kmer
        ))
    }

    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        let explicit_samples = !self.bam_files.is_empty()
            || self.read_lengths.is_some()
            || self.read_offsets.is_some()
            || !self.bam_legends.is_empty();

        if self.bam_list_file.is_some() && explicit_samples {
            return Err(Error::Parameter(
                "--bamListFile and --input/--specific_reads_length/--offset/--bam_file_legend are mutually exclusive".into(),
            ));
        }

        if self.bam_list_file.is_none() && self.bam_files.is_empty() {
            return Err(Error::Parameter(
                "either --bamListFile or --input is required".into(),
            ));
        }

        if !self.bam_files.is_empty() {
            if self.read_lengths.is_none() || self.read_offsets.is_none() {
                return Err(Error::Parameter(
                    "--input requires --specific_reads_length and --offset".into(),
                ));
            }
            if self.bam_legends.is_empty() {
                return Err(Error::Parameter(
                    "--input requires --bam_file_legend".into(),
                ));
            }
        }

        if self.kmer == 0 {
            return Err(Error::Parameter("--kmer must be >= 1".into()));
        }

        if self.base.is_empty() {
            return Err(Error::Parameter("--base must not be empty".into()));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
