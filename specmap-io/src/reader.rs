//! Delimited-text reader.

use std::fs;
use std::path::Path;

use log::debug;
use specmap_core::{DataLoader, LoadError, ReferenceSpectrum, SpectralMap};

/// Loader for delimited-text spectral files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLoader;

impl TextLoader {
    fn read(path: &Path) -> Result<Vec<Vec<f64>>, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rows = parse_rows(&text)?;
        debug!("read {} data lines from {}", rows.len(), path.display());
        Ok(rows)
    }
}

impl DataLoader for TextLoader {
    fn load_map(&self, path: &Path) -> Result<SpectralMap, LoadError> {
        SpectralMap::from_rows(Self::read(path)?)
    }

    fn load_reference(&self, path: &Path) -> Result<ReferenceSpectrum, LoadError> {
        let rows = Self::read(path)?;
        let columns = rows.first().map_or(0, Vec::len);
        let values = match (rows.len(), columns) {
            (0, _) | (_, 0) => return Err(LoadError::Empty),
            (1, _) => rows.into_iter().next().unwrap_or_default(),
            (_, 1) => rows.into_iter().flatten().collect(),
            (rows, columns) => return Err(LoadError::NotASpectrum { rows, columns }),
        };
        ReferenceSpectrum::new(values)
    }
}

/// Parse every data line of `text` into a row of values.
///
/// Line numbers in errors are 1-based and count every line, including
/// comments and blanks.
///
/// # Errors
/// Returns [`LoadError::Parse`] for a token that is not a number, and
/// [`LoadError::Ragged`] for a row whose length differs from the first row.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>, LoadError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|e| LoadError::Parse {
                    line: i + 1,
                    message: format!("{token:?}: {e}"),
                })
            })
            .collect::<Result<Vec<f64>, LoadError>>()?;
        if row.is_empty() {
            continue;
        }
        if let Some(expected) = rows.first().map(Vec::len) {
            if row.len() != expected {
                return Err(LoadError::Ragged {
                    line: i + 1,
                    expected,
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }
    Ok(rows)
}
