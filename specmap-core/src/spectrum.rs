//! Spectral data containers: map, reference spectrum, and wavelength axis.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::LoadError;

/// A 2D spectral map: one spectrum (row) per scan position.
///
/// Rows all share the same channel count. Maps are never mutated in place;
/// a new load replaces the whole map.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralMap {
    data: Array2<f64>,
}

impl SpectralMap {
    /// Build a map from row vectors.
    ///
    /// # Errors
    /// Returns [`LoadError::Empty`] if there are no rows or no channels, and
    /// [`LoadError::Ragged`] if rows differ in length (1-based row number).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let row_count = rows.len();
        let channel_count = rows.first().map_or(0, Vec::len);
        if row_count == 0 || channel_count == 0 {
            return Err(LoadError::Empty);
        }
        let mut flat = Vec::with_capacity(row_count * channel_count);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != channel_count {
                return Err(LoadError::Ragged {
                    line: i + 1,
                    expected: channel_count,
                    found: row.len(),
                });
            }
            flat.extend(row);
        }
        let data = Array2::from_shape_vec((row_count, channel_count), flat)
            .map_err(|_| LoadError::Empty)?;
        Ok(Self { data })
    }

    /// Wrap an existing array (rows x channels).
    ///
    /// # Errors
    /// Returns [`LoadError::Empty`] if either dimension is zero.
    pub fn from_array(data: Array2<f64>) -> Result<Self, LoadError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(LoadError::Empty);
        }
        Ok(Self { data })
    }

    /// Number of rows (scan positions).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.nrows()
    }

    /// Number of channels per row.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.data.ncols()
    }

    /// One row of the map, if it exists.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.row_count()).then(|| self.data.index_axis(Axis(0), index))
    }

    /// Backing array (rows x channels).
    #[must_use]
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Minimum and maximum intensity over the whole map.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// A single reference spectrum used as calibration input.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSpectrum {
    values: Array1<f64>,
}

impl ReferenceSpectrum {
    /// Create a reference spectrum.
    ///
    /// # Errors
    /// Returns [`LoadError::Empty`] for an empty sequence.
    pub fn new(values: Vec<f64>) -> Result<Self, LoadError> {
        if values.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self {
            values: Array1::from(values),
        })
    }

    /// Number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.values.len()
    }

    /// Intensity samples.
    #[must_use]
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }
}

/// Wavelength (or raw channel) value of every channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisData {
    values: Vec<f64>,
}

impl AxisData {
    /// Raw channel index axis `0, 1, ..., channel_count - 1`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn index(channel_count: usize) -> Self {
        Self {
            values: (0..channel_count).map(|i| i as f64).collect(),
        }
    }

    /// Number of channels covered by the axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the axis is empty (no map loaded yet).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Axis values in channel order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First and last axis values.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((*self.values.first()?, *self.values.last()?))
    }
}

impl From<Vec<f64>> for AxisData {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}
