/// Occurrence table output
///
/// One line per motif occurrence, tab-separated, no header:
/// 1. transcript ID
/// 2. motif sequence
/// 3. motif start (0-based)
/// 4. motif end (0-based, exclusive)
/// 5. window values, `upstream + downstream + 1` columns
use crate::error::Error;
use crate::motif::MotifOccurrence;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered writer for one sample's occurrence table.
pub struct OccurrenceWriter<W: Write> {
    inner: BufWriter<W>,
    path: PathBuf,
    rows: u64,
}

impl OccurrenceWriter<File> {
    /// Create (or truncate) the output file.
    pub fn create(path: &Path) -> Result<Self, Error> {
        let file = File::create(path).map_err(|e| Error::io(e, path))?;
        Ok(Self::new(file, path))
    }
}

impl<W: Write> OccurrenceWriter<W> {
    pub fn new(inner: W, path: &Path) -> Self {
        Self {
            inner: BufWriter::new(inner),
            path: path.to_path_buf(),
            rows: 0,
        }
    }

    pub fn write_occurrence(&mut self, occurrence: &MotifOccurrence) -> Result<(), Error> {
        let mut line = format!(
            "{}\t{}\t{}\t{}",
            occurrence.transcript_id, occurrence.motif, occurrence.start, occurrence.end
        );
        for value in &occurrence.window {
            line.push('\t');
            line.push_str(&value.to_string());
        }
        line.push('\n');

        self.inner
            .write_all(line.as_bytes())
            .map_err(|e| Error::io(e, &self.path))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows and hand back the row count.
    pub fn finish(mut self) -> Result<u64, Error> {
        self.inner.flush().map_err(|e| Error::io(e, &self.path))?;
        Ok(self.rows)
    }
}
