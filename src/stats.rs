/// Per-sample filter tallies and reporting
use log::{debug, info};

/// Tracks why transcripts were dropped while scanning one sample
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Reads placed over every annotated transcript (normalization denominator)
    pub all_counts: u64,
    /// CDS length not a multiple of three (rejected)
    pub cds_not_triplet: u64,
    /// CDS shorter than the minimum codon count (counted, still scanned)
    pub cds_too_short: u64,
    /// CDS reads or RPKM below the threshold (rejected)
    pub low_cds_reads: u64,
    /// Transcript shorter than the window span (rejected)
    pub transcript_too_short: u64,
    /// Mean normalized density of zero (rejected, not a filter)
    pub zero_signal: u64,
    /// 5' leader too short for the window or motif (rejected, not a filter)
    pub utr_too_short: u64,
    /// Transcripts with at least one emitted occurrence
    pub passed: u64,
    /// Emitted motif occurrences
    pub occurrences: u64,
}

impl ScanStats {
    /// Create new statistics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Print summary statistics to log
    pub fn print_summary(&self) {
        info!(
            "The number of genes whose length of CDS could not divided by three: {}",
            self.cds_not_triplet
        );
        info!(
            "The number of genes whose length of CDS is less than the criteria: {}",
            self.cds_too_short
        );
        info!(
            "The number of genes whose read counts on CDS are less than the criteria: {}",
            self.low_cds_reads
        );
        info!(
            "The number of genes whose length < upstream+downstream+1: {}",
            self.transcript_too_short
        );
        info!(
            "The final number of genes used for following analysis is: {}",
            self.passed
        );

        debug!(
            "Rejected by filters: {}; reads over all transcripts: {}; zero-signal transcripts: {}; short 5' leaders: {}; occurrences: {}",
            self.total_rejected(),
            self.all_counts,
            self.zero_signal,
            self.utr_too_short,
            self.occurrences
        );
    }

    /// Total transcripts rejected by the reported filters
    pub fn total_rejected(&self) -> u64 {
        self.cds_not_triplet + self.low_cds_reads + self.transcript_too_short
    }
}
