/// Motif scanning and window aggregation for one sample
///
/// Scanning runs in two passes over the alignment source. The first pass sums
/// the reads of every annotated transcript into the sample-wide denominator
/// (`all_counts`); the second walks the candidate transcripts in annotation
/// order, normalizes their density against that denominator and emits one
/// [`MotifOccurrence`] per accepted motif hit. The second pass is lazy: the
/// scanner is an iterator and the caller decides how rows are written.
use std::collections::{BTreeSet, VecDeque};

use log::debug;

use crate::annotation::{AnnotationTable, TranscriptRecord};
use crate::density::{build_density, DensityProfile, ReadSelector};
use crate::error::Error;
use crate::io::AlignmentSource;
use crate::params::{FilterMode, Parameters, RegionMode};
use crate::sequence::SequenceTable;
use crate::stats::ScanStats;
use crate::window::extract_window;

/// Settings shared by every sample of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub upstream: usize,
    pub downstream: usize,
    pub kmer: usize,
    /// Bases a motif may consist of (upper case).
    pub alphabet: Vec<u8>,
    pub region: RegionMode,
    pub filter_mode: FilterMode,
    /// Minimum CDS reads, or RPKM in [`FilterMode::Rpkm`].
    pub min_cds_reads: f64,
    /// Minimum CDS length in nucleotides.
    pub min_cds_length: usize,
    /// Minimum raw reads inside a window.
    pub min_window_reads: u64,
}

impl ScanConfig {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            upstream: params.upstream,
            downstream: params.downstream,
            kmer: params.kmer,
            alphabet: params.base.to_ascii_uppercase().into_bytes(),
            region: params.region,
            filter_mode: params.filter_mode,
            min_cds_reads: params.min_cds_counts,
            min_cds_length: params.min_cds_codon * 3,
            min_window_reads: params.min_window_reads,
        }
    }

    /// Number of values in every emitted window.
    pub fn window_len(&self) -> usize {
        self.upstream + self.downstream + 1
    }
}

/// One accepted motif hit with the normalized density around it.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifOccurrence {
    pub transcript_id: String,
    pub motif: String,
    /// 0-based first base of the motif.
    pub start: usize,
    /// 0-based end of the motif (exclusive).
    pub end: usize,
    /// `upstream + downstream + 1` mean-scaled density values.
    pub window: Vec<f64>,
}

/// Whether `candidate` is a non-empty run of bases from `alphabet`.
pub fn is_motif(candidate: &[u8], alphabet: &[u8]) -> bool {
    !candidate.is_empty() && candidate.iter().all(|b| alphabet.contains(b))
}

/// Reads per kilobase of transcript per million placed reads, for the CDS.
pub fn rpkm(cds_reads: u64, all_counts: u64, transcript_length: usize) -> f64 {
    1e9 * cds_reads as f64 / (all_counts as f64 * transcript_length as f64)
}

/// Density scaled to reads per million, then divided by its own mean.
///
/// Returns `None` when the transcript carries no signal (mean of zero, or no
/// reads at all in the sample).
pub fn normalize(counts: &[u64], all_counts: u64) -> Option<Vec<f64>> {
    if all_counts == 0 || counts.is_empty() {
        return None;
    }

    let per_million: Vec<f64> = counts
        .iter()
        .map(|&n| 1e6 * (n as f64 / all_counts as f64))
        .collect();
    let mean = per_million.iter().sum::<f64>() / per_million.len() as f64;
    if mean == 0.0 {
        return None;
    }

    Some(per_million.into_iter().map(|v| v / mean).collect())
}

/// First pass: reads placed over every annotated transcript.
pub fn accumulate_all_counts<S: AlignmentSource>(
    source: &mut S,
    annotation: &AnnotationTable,
    selector: &ReadSelector,
) -> Result<u64, Error> {
    let mut all_counts = 0u64;
    for tx in annotation.iter() {
        let records = source.records_for(&tx.transcript_id)?;
        let profile = build_density(
            &tx.transcript_id,
            &records,
            selector,
            tx.length,
            tx.start_codon,
            tx.stop_codon,
        );
        all_counts += profile.total_reads;
    }
    Ok(all_counts)
}

/// Transcripts eligible for the second pass, in annotation order: selected,
/// present in the alignment source and with a loaded sequence.
pub fn candidate_transcripts(
    annotation: &AnnotationTable,
    sequences: &SequenceTable,
    known_references: &BTreeSet<String>,
    selected: &BTreeSet<String>,
) -> Vec<String> {
    annotation
        .iter()
        .map(|tx| &tx.transcript_id)
        .filter(|id| {
            selected.contains(*id) && known_references.contains(*id) && sequences.contains(id)
        })
        .cloned()
        .collect()
}

/// Second pass for one transcript: filters, normalization and motif scan.
///
/// Rejections are tallied in `stats`; accepted occurrences are returned in
/// position order.
pub fn scan_transcript(
    tx: &TranscriptRecord,
    sequence: &[u8],
    profile: &DensityProfile,
    all_counts: u64,
    config: &ScanConfig,
    stats: &mut ScanStats,
) -> Vec<MotifOccurrence> {
    let start = tx.start_codon;
    let stop = tx.stop_codon;
    let (upstream, downstream, kmer) = (config.upstream, config.downstream, config.kmer);

    let cds_end = (stop + 3).min(sequence.len());
    let cds = sequence.get(start..cds_end).unwrap_or(&[]);
    if cds.len() % 3 != 0 {
        stats.cds_not_triplet += 1;
        return Vec::new();
    }
    if cds.len() < config.min_cds_length {
        // counted only; the transcript is still scanned
        stats.cds_too_short += 1;
    }

    let Some(normalized) = normalize(&profile.counts, all_counts) else {
        debug!("{}: no signal, skipped", tx.transcript_id);
        stats.zero_signal += 1;
        return Vec::new();
    };

    let below_threshold = match config.filter_mode {
        FilterMode::Rpkm => rpkm(profile.cds_reads, all_counts, tx.length) < config.min_cds_reads,
        FilterMode::Counts => (profile.cds_reads as f64) < config.min_cds_reads,
    };
    if below_threshold {
        stats.low_cds_reads += 1;
        return Vec::new();
    }

    if sequence.len() < config.window_len() {
        stats.transcript_too_short += 1;
        return Vec::new();
    }

    let occurrence = |i: usize, motif: &[u8], window: Vec<f64>| MotifOccurrence {
        transcript_id: tx.transcript_id.clone(),
        motif: String::from_utf8_lossy(motif).into_owned(),
        start: i,
        end: i + kmer,
        window,
    };

    let mut rows = Vec::new();
    match config.region {
        RegionMode::Cds => {
            let scan_end = (stop + 3).saturating_sub(downstream);
            for i in (start + upstream)..scan_end {
                let Some(motif) = sequence.get(i..i + kmer) else {
                    continue;
                };
                if !is_motif(motif, &config.alphabet) {
                    continue;
                }

                let (lo, hi) = (i - upstream, i + downstream + 1);
                if hi > normalized.len() {
                    continue;
                }
                let raw: u64 = profile.counts[lo..hi].iter().sum();
                if raw < config.min_window_reads {
                    continue;
                }

                rows.push(occurrence(i, motif, normalized[lo..hi].to_vec()));
            }
        }
        RegionMode::FivePrimeUtr => {
            if start <= kmer || start <= downstream || start <= upstream {
                stats.utr_too_short += 1;
                return Vec::new();
            }

            for i in upstream..(start - downstream) {
                let Some(motif) = sequence.get(i..i + kmer) else {
                    continue;
                };
                if !is_motif(motif, &config.alphabet) {
                    continue;
                }

                let raw: u64 = extract_window(&profile.counts, i, upstream, downstream, start)
                    .iter()
                    .sum();
                if raw < config.min_window_reads {
                    continue;
                }

                let window = extract_window(&normalized, i, upstream, downstream, start);
                rows.push(occurrence(i, motif, window));
            }
        }
    }

    if !rows.is_empty() {
        stats.passed += 1;
        stats.occurrences += rows.len() as u64;
    }
    rows
}

/// Lazy producer of the motif occurrences of one sample.
///
/// Construction runs the first pass; iteration runs the second, one
/// transcript at a time, yielding rows in transcript order.
pub struct MotifScanner<'a, S: AlignmentSource> {
    source: &'a mut S,
    annotation: &'a AnnotationTable,
    sequences: &'a SequenceTable,
    selector: &'a ReadSelector,
    config: &'a ScanConfig,
    candidates: std::vec::IntoIter<String>,
    pending: VecDeque<MotifOccurrence>,
    stats: ScanStats,
}

impl<'a, S: AlignmentSource> MotifScanner<'a, S> {
    pub fn new(
        source: &'a mut S,
        annotation: &'a AnnotationTable,
        sequences: &'a SequenceTable,
        selected: &BTreeSet<String>,
        selector: &'a ReadSelector,
        config: &'a ScanConfig,
    ) -> Result<Self, Error> {
        let all_counts = accumulate_all_counts(source, annotation, selector)?;
        let candidates = candidate_transcripts(
            annotation,
            sequences,
            &source.known_reference_names(),
            selected,
        );
        debug!(
            "{} reads over all transcripts; {} candidate transcripts",
            all_counts,
            candidates.len()
        );

        Ok(Self {
            source,
            annotation,
            sequences,
            selector,
            config,
            candidates: candidates.into_iter(),
            pending: VecDeque::new(),
            stats: ScanStats {
                all_counts,
                ..ScanStats::default()
            },
        })
    }

    pub fn into_stats(self) -> ScanStats {
        self.stats
    }

    fn scan_next(&mut self, transcript_id: &str) -> Result<Vec<MotifOccurrence>, Error> {
        let (Some(tx), Some(sequence)) = (
            self.annotation.get(transcript_id),
            self.sequences.get(transcript_id),
        ) else {
            return Ok(Vec::new());
        };

        let records = self.source.records_for(transcript_id)?;
        let profile = build_density(
            transcript_id,
            &records,
            self.selector,
            tx.length,
            tx.start_codon,
            tx.stop_codon,
        );

        Ok(scan_transcript(
            tx,
            sequence,
            &profile,
            self.stats.all_counts,
            self.config,
            &mut self.stats,
        ))
    }
}

impl<S: AlignmentSource> Iterator for MotifScanner<'_, S> {
    type Item = Result<MotifOccurrence, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                return Some(Ok(row));
            }
            let transcript_id = self.candidates.next()?;
            match self.scan_next(&transcript_id) {
                Ok(rows) => self.pending.extend(rows),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{AlignmentRecord, MemorySource};

    fn config(region: RegionMode) -> ScanConfig {
        ScanConfig {
            upstream: 3,
            downstream: 3,
            kmer: 4,
            alphabet: b"AG".to_vec(),
            region,
            filter_mode: FilterMode::Counts,
            min_cds_reads: 1.0,
            min_cds_length: 0,
            min_window_reads: 1,
        }
    }

    fn transcript(id: &str, length: usize, start: usize, stop: usize) -> TranscriptRecord {
        TranscriptRecord {
            transcript_id: id.to_string(),
            gene_id: format!("{id}_gene"),
            gene_name: format!("{id}_name"),
            chrom: "chr1".to_string(),
            length,
            start_codon: start,
            stop_codon: stop,
            cds_length: stop + 3 - start,
        }
    }

    fn all_reads_at(positions: &[usize], tx: &TranscriptRecord) -> DensityProfile {
        let records: Vec<AlignmentRecord> = positions
            .iter()
            .map(|&start| AlignmentRecord {
                start,
                query_length: 28,
                flags: 0,
            })
            .collect();
        build_density(
            &tx.transcript_id,
            &records,
            &ReadSelector::All,
            tx.length,
            tx.start_codon,
            tx.stop_codon,
        )
    }

    #[test]
    fn motif_alphabet() {
        assert!(is_motif(b"AGAG", b"AG"));
        assert!(!is_motif(b"AGAT", b"AG"));
        assert!(is_motif(b"GGGG", b"AG"));
        assert!(!is_motif(b"", b"AG"));
        assert!(is_motif(b"CTTC", b"CT"));
    }

    #[test]
    fn rpkm_at_threshold_passes() {
        let value = rpkm(64, 1_000_000, 1000);
        assert_eq!(value, 64.0);

        let tx = transcript("tx1", 1000, 100, 400);
        let positions: Vec<usize> = (0..64).map(|i| 100 + i * 4).collect();
        let profile = all_reads_at(&positions, &tx);
        assert_eq!(profile.cds_reads, 64);

        let sequence = vec![b'C'; 1000];
        let mut cfg = config(RegionMode::Cds);
        cfg.filter_mode = FilterMode::Rpkm;
        cfg.min_cds_reads = 64.0;

        let mut stats = ScanStats::new();
        scan_transcript(&tx, &sequence, &profile, 1_000_000, &cfg, &mut stats);
        assert_eq!(stats.low_cds_reads, 0);

        cfg.min_cds_reads = 64.5;
        let mut stats = ScanStats::new();
        scan_transcript(&tx, &sequence, &profile, 1_000_000, &cfg, &mut stats);
        assert_eq!(stats.low_cds_reads, 1);
    }

    #[test]
    fn counts_mode_uses_raw_cds_reads() {
        let tx = transcript("tx1", 30, 3, 24);
        let profile = all_reads_at(&[1, 5, 6], &tx);
        let sequence = vec![b'C'; 30];
        let mut cfg = config(RegionMode::Cds);
        cfg.min_cds_reads = 3.0;

        let mut stats = ScanStats::new();
        scan_transcript(&tx, &sequence, &profile, 100, &cfg, &mut stats);
        assert_eq!(stats.low_cds_reads, 1);

        cfg.min_cds_reads = 2.0;
        let mut stats = ScanStats::new();
        scan_transcript(&tx, &sequence, &profile, 100, &cfg, &mut stats);
        assert_eq!(stats.low_cds_reads, 0);
    }

    #[test]
    fn short_cds_is_counted_not_rejected() {
        // length 30, start codon at 3, stop codon at 24: CDS of 24 nt
        let tx = transcript("tx1", 30, 3, 24);
        let mut sequence = vec![b'C'; 30];
        sequence[10..14].copy_from_slice(b"AGAG");
        let profile = all_reads_at(&[8, 9, 10, 11, 12], &tx);

        let mut cfg = config(RegionMode::Cds);
        cfg.min_cds_length = 10 * 3;

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 5, &cfg, &mut stats);

        assert_eq!(stats.cds_not_triplet, 0);
        assert_eq!(stats.cds_too_short, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].motif, "AGAG");
        assert_eq!((rows[0].start, rows[0].end), (10, 14));
        assert_eq!(stats.passed, 1);
    }

    #[test]
    fn cds_not_multiple_of_three_is_rejected() {
        let tx = transcript("tx1", 30, 3, 23);
        let sequence = vec![b'A'; 30];
        let profile = all_reads_at(&[5], &tx);

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 1, &config(RegionMode::Cds), &mut stats);
        assert!(rows.is_empty());
        assert_eq!(stats.cds_not_triplet, 1);
    }

    #[test]
    fn zero_signal_is_skipped_silently() {
        let tx = transcript("tx1", 30, 3, 24);
        let sequence = vec![b'A'; 30];
        let profile = all_reads_at(&[], &tx);

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 10, &config(RegionMode::Cds), &mut stats);
        assert!(rows.is_empty());
        assert_eq!(stats.zero_signal, 1);
        assert_eq!(stats.total_rejected(), 0);
    }

    #[test]
    fn transcript_shorter_than_window_is_rejected() {
        let tx = transcript("tx1", 30, 3, 24);
        let sequence = vec![b'A'; 30];
        let profile = all_reads_at(&[5, 6, 7], &tx);
        let mut cfg = config(RegionMode::Cds);
        cfg.upstream = 15;
        cfg.downstream = 15;

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 3, &cfg, &mut stats);
        assert!(rows.is_empty());
        assert_eq!(stats.transcript_too_short, 1);
    }

    #[test]
    fn normalized_window_is_mean_scaled() {
        let tx = transcript("tx1", 30, 3, 24);
        let mut sequence = vec![b'C'; 30];
        sequence[12..16].copy_from_slice(b"GAAG");
        // 30 reads spread as 3 at 12 and 1 on 27 other positions
        let mut positions = vec![12, 12];
        positions.extend(0..30);
        positions.retain(|&p| p != 0 && p != 1);
        let profile = all_reads_at(&positions, &tx);
        assert_eq!(profile.counts.iter().sum::<u64>(), 30);

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 30, &config(RegionMode::Cds), &mut stats);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].window.len(), 7);
        // mean per-million density is 1e6/30, so a single read scales to 1.0
        let expected = [1.0, 1.0, 1.0, 3.0, 1.0, 1.0, 1.0];
        for (got, want) in rows[0].window.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn low_window_reads_are_skipped() {
        let tx = transcript("tx1", 30, 3, 24);
        let mut sequence = vec![b'C'; 30];
        sequence[12..16].copy_from_slice(b"AAAA");
        let profile = all_reads_at(&[0, 1, 2], &tx);
        let mut cfg = config(RegionMode::Cds);
        cfg.min_cds_reads = 0.0;
        cfg.min_window_reads = 16;

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 3, &cfg, &mut stats);
        assert!(rows.is_empty());
        assert_eq!(stats.passed, 0);
    }

    #[test]
    fn cds_scan_range_respects_window() {
        // motifs right at the CDS edges cannot fit a full window
        let tx = transcript("tx1", 30, 3, 24);
        let mut sequence = vec![b'C'; 30];
        sequence[3..7].copy_from_slice(b"AGAG");
        sequence[24..28].copy_from_slice(b"AGAG");
        sequence[14..18].copy_from_slice(b"GGGA");
        let profile = all_reads_at(&(0..30).collect::<Vec<_>>(), &tx);

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 30, &config(RegionMode::Cds), &mut stats);
        let starts: Vec<usize> = rows.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![14]);
    }

    #[test]
    fn utr_scan_emits_leader_motifs() {
        let tx = transcript("tx1", 40, 12, 30);
        let mut sequence = vec![b'C'; 40];
        sequence[3..7].copy_from_slice(b"AGGA");
        let profile = all_reads_at(&(0..40).collect::<Vec<_>>(), &tx);
        let mut cfg = config(RegionMode::FivePrimeUtr);
        cfg.upstream = 3;
        cfg.downstream = 4;

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 40, &cfg, &mut stats);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start, 3);
        assert_eq!(rows[0].window.len(), 8);
        assert!(rows[0].window.iter().all(|&v| (v - 1.0).abs() < 1e-9));
    }

    #[test]
    fn utr_too_short_for_window_is_skipped() {
        let tx = transcript("tx1", 40, 4, 31);
        let sequence = vec![b'A'; 40];
        let profile = all_reads_at(&(0..40).collect::<Vec<_>>(), &tx);
        let mut cfg = config(RegionMode::FivePrimeUtr);
        cfg.downstream = 4;

        let mut stats = ScanStats::new();
        let rows = scan_transcript(&tx, &sequence, &profile, 40, &cfg, &mut stats);
        assert!(rows.is_empty());
        assert_eq!(stats.utr_too_short, 1);
    }

    fn scanner_fixture() -> (MemorySource, AnnotationTable, SequenceTable) {
        let mut annotation = AnnotationTable::default();
        let mut sequences = SequenceTable::default();
        let mut source = MemorySource::new();

        for (id, motif_at) in [("txA", 12usize), ("txB", 15), ("txC", 9)] {
            let tx = transcript(id, 30, 3, 24);
            annotation.insert(tx);
            let mut seq = vec![b'C'; 30];
            seq[motif_at..motif_at + 4].copy_from_slice(b"AGAG");
            sequences.insert_checked(id.to_string(), seq);
            for p in 0..30 {
                source.push(
                    id,
                    AlignmentRecord {
                        start: p,
                        query_length: 28,
                        flags: 0,
                    },
                );
            }
        }

        // annotated but absent from the sample: still in the denominator only
        annotation.insert(transcript("txD", 30, 3, 24));
        sequences.insert_checked("txD".to_string(), vec![b'A'; 30]);

        // annotated, in the sample, not selected
        annotation.insert(transcript("txE", 30, 3, 24));
        for p in 0..10 {
            source.push(
                "txE",
                AlignmentRecord {
                    start: p,
                    query_length: 28,
                    flags: 0,
                },
            );
        }

        (source, annotation, sequences)
    }

    #[test]
    fn scanner_accumulates_every_annotated_transcript() {
        let (mut source, annotation, sequences) = scanner_fixture();
        let selected: BTreeSet<String> = ["txA", "txB"].iter().map(|s| s.to_string()).collect();
        let cfg = config(RegionMode::Cds);

        let scanner = MotifScanner::new(
            &mut source,
            &annotation,
            &sequences,
            &selected,
            &ReadSelector::All,
            &cfg,
        )
        .unwrap();
        assert_eq!(scanner.into_stats().all_counts, 100);
    }

    #[test]
    fn scanner_yields_rows_in_annotation_order() {
        let (mut source, annotation, sequences) = scanner_fixture();
        let selected = annotation.all_transcripts();
        let cfg = config(RegionMode::Cds);

        let mut scanner = MotifScanner::new(
            &mut source,
            &annotation,
            &sequences,
            &selected,
            &ReadSelector::All,
            &cfg,
        )
        .unwrap();
        let rows: Vec<MotifOccurrence> = scanner.by_ref().map(|r| r.unwrap()).collect();
        let stats = scanner.into_stats();

        let keys: Vec<(&str, usize)> = rows
            .iter()
            .map(|r| (r.transcript_id.as_str(), r.start))
            .collect();
        assert_eq!(keys, vec![("txA", 12), ("txB", 15), ("txC", 9)]);
        assert_eq!(stats.passed, 3);
        assert_eq!(stats.occurrences, 3);
    }

    #[test]
    fn scanning_twice_is_identical() {
        let (mut source, annotation, sequences) = scanner_fixture();
        let selected = annotation.all_transcripts();
        let cfg = config(RegionMode::Cds);

        let mut run = || -> Vec<MotifOccurrence> {
            MotifScanner::new(
                &mut source,
                &annotation,
                &sequences,
                &selected,
                &ReadSelector::All,
                &cfg,
            )
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
        };

        let first = run();
        let second = run();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn scanner_counts_non_triplet_cds_once() {
        let (mut source, mut annotation, mut sequences) = scanner_fixture();
        annotation.insert(transcript("txF", 30, 3, 23));
        let mut seq = vec![b'C'; 30];
        seq[12..16].copy_from_slice(b"AGAG");
        sequences.insert_checked("txF".to_string(), seq);
        for p in 0..30 {
            source.push(
                "txF",
                AlignmentRecord {
                    start: p,
                    query_length: 28,
                    flags: 0,
                },
            );
        }
        let selected = annotation.all_transcripts();
        let cfg = config(RegionMode::Cds);

        let mut scanner = MotifScanner::new(
            &mut source,
            &annotation,
            &sequences,
            &selected,
            &ReadSelector::All,
            &cfg,
        )
        .unwrap();
        let rows: Vec<MotifOccurrence> = scanner.by_ref().map(|r| r.unwrap()).collect();
        let stats = scanner.into_stats();

        assert!(rows.iter().all(|r| r.transcript_id != "txF"));
        assert_eq!(stats.cds_not_triplet, 1);
        assert_eq!(stats.passed, 3);
    }
}
