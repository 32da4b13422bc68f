pub mod error;
pub mod params;

pub mod annotation;
pub mod density;
pub mod io;
pub mod motif;
pub mod output;
pub mod sample;
pub mod sequence;
pub mod stats;
pub mod window;

use log::{info, warn};

use crate::annotation::AnnotationTable;
use crate::io::bam::BamSource;
use crate::motif::{MotifScanner, ScanConfig};
use crate::output::OccurrenceWriter;
use crate::params::Parameters;
use crate::sequence::SequenceTable;

/// Top-level dispatcher. Called from `main()` after CLI parsing.
pub fn run(params: &Parameters) -> anyhow::Result<()> {
    params.validate()?;
    let samples = sample::resolve(params)?;

    info!("ribo-purine v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "region: {}, motif: poly{} {}-mer, window: -{}..+{}",
        params.region, params.base, params.kmer, params.upstream, params.downstream
    );
    info!(
        "filter: {} >= {}, CDS >= {} codons, window reads >= {}",
        params.filter_mode, params.min_cds_counts, params.min_cds_codon, params.min_window_reads
    );

    let annotation = AnnotationTable::from_path(&params.coordinate_file)?;
    if annotation.is_empty() {
        warn!(
            "No usable transcripts in {}; every output will be empty",
            params.coordinate_file.display()
        );
    }
    let selected = match &params.select_trans_list {
        Some(path) => annotation.select_from_path(path, params.id_type)?,
        None => annotation.all_transcripts(),
    };
    let sequences = SequenceTable::from_fasta(&params.transcript_fasta)?;
    if sequences.is_empty() {
        warn!(
            "No usable sequences in {}; every output will be empty",
            params.transcript_fasta.display()
        );
    }
    let config = ScanConfig::from_params(params);

    for sample in &samples {
        info!(
            "Start analyze the sample: {} ({}, reads: {})",
            sample.legend,
            sample.bam.display(),
            sample.selector
        );

        let mut source = BamSource::open(&sample.bam)?;
        let mut scanner = MotifScanner::new(
            &mut source,
            &annotation,
            &sequences,
            &selected,
            &sample.selector,
            &config,
        )?;

        let output_path = params.output_path(&sample.legend);
        let mut writer = OccurrenceWriter::create(&output_path)?;
        for occurrence in scanner.by_ref() {
            writer.write_occurrence(&occurrence?)?;
        }
        let rows = writer.finish()?;

        let stats = scanner.into_stats();
        stats.print_summary();
        info!(
            "Wrote {} occurrences to {}",
            rows,
            output_path.display()
        );
    }

    info!("Finish!");
    Ok(())
}
