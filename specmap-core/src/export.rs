//! Export of queued spectra to text files.
//!
//! Each queued row becomes `<row>.txt` in the destination folder:
//!
//! ```text
//! # abs_path_raw: /data/map.txt
//! # abs_path_ref: /data/Ne_lamp.txt
//! # calibration: Ne, Lorentzian, dim=2, 9 peaks, rms=0.012 nm
//!
//! 612.31,1043
//! 612.42,1051
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::session::SpectralSession;

/// Header lines written at the top of every exported file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportHeader {
    pub map_path: String,
    pub reference_path: String,
    pub calibration: String,
}

impl ExportHeader {
    /// Header describing the session's current sources and calibration.
    #[must_use]
    pub fn from_session(session: &SpectralSession) -> Self {
        Self {
            map_path: display_path(session.map_path()),
            reference_path: display_path(session.reference_path()),
            calibration: session.calibration_descriptor(),
        }
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

/// Writer for one exported spectrum file.
pub struct SpectrumFileWriter<W: Write> {
    writer: W,
}

impl SpectrumFileWriter<BufWriter<File>> {
    /// Create (or truncate) a file for writing.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl<W: Write> SpectrumFileWriter<W> {
    /// Wrap an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the header block and one `axis,intensity` line per channel.
    ///
    /// # Errors
    /// Returns [`Error::Io`] on write failure.
    pub fn write_spectrum<'a, I>(&mut self, header: &ExportHeader, axis: &[f64], values: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        writeln!(self.writer, "# abs_path_raw: {}", header.map_path)?;
        writeln!(self.writer, "# abs_path_ref: {}", header.reference_path)?;
        writeln!(self.writer, "# calibration: {}", header.calibration)?;
        writeln!(self.writer)?;
        for (x, y) in axis.iter().zip(values) {
            // Debug keeps the trailing `.0` on integral values.
            writeln!(self.writer, "{x:?},{y:?}")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Recover the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Result of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files written, in queue order (repeated paths for duplicate rows).
    pub written: Vec<PathBuf>,
    /// Number of writes that replaced a file written earlier in the same run.
    pub overwritten: usize,
}

/// File name used for an exported row.
#[must_use]
pub fn export_file_name(row: usize) -> String {
    format!("{row}.txt")
}

impl SpectralSession {
    /// Write every queued row to `destination`.
    ///
    /// Does nothing if the queue is empty or no destination was chosen.
    /// Queued rows are checked against the loaded map before any file is
    /// written. Duplicate rows rewrite the same file; the last write wins.
    /// The queue is left as it is.
    ///
    /// # Errors
    /// - [`Error::NoMap`] if rows are queued but no map is loaded.
    /// - [`Error::RowOutOfRange`] if a queued row is not in the map.
    /// - [`Error::Io`] on write failure.
    pub fn export(&self, destination: Option<&Path>) -> Result<ExportSummary> {
        let mut summary = ExportSummary::default();
        let Some(destination) = destination else {
            return Ok(summary);
        };
        if self.queue().is_empty() {
            return Ok(summary);
        }
        let map = self.map().ok_or(Error::NoMap)?;
        let row_count = map.row_count();
        if let Some(&row) = self.queue().rows().iter().find(|&&r| r >= row_count) {
            return Err(Error::RowOutOfRange { row, row_count });
        }

        let header = ExportHeader::from_session(self);
        let axis = self.axis().values();
        let mut seen = HashSet::new();
        for &row in self.queue().rows() {
            let Some(values) = map.row(row) else {
                return Err(Error::RowOutOfRange { row, row_count });
            };
            let path = destination.join(export_file_name(row));
            if !seen.insert(row) {
                warn!("row {row} queued more than once; overwriting {}", path.display());
                summary.overwritten += 1;
            }
            let mut writer = SpectrumFileWriter::create(&path)?;
            writer.write_spectrum(&header, axis, values.iter())?;
            summary.written.push(path);
        }
        info!(
            "exported {} spectra to {}",
            summary.written.len(),
            destination.display()
        );
        Ok(summary)
    }
}
