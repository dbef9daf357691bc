// Tue Jan 20 2026 - Alex

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Sink for rendered records. Every record is written whole and flushed before returning,
/// so a reader tailing the file never sees half a record.
pub struct LayoutWriter<W: Write> {
    inner: W,
    records: usize,
}

impl LayoutWriter<BufWriter<File>> {
    /// Creates or truncates `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LayoutWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    pub fn write_record(&mut self, rendered: &str) -> io::Result<()> {
        self.inner.write_all(rendered.as_bytes())?;
        self.inner.flush()?;
        self.records += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
