//! Data loader interface.

use std::path::Path;

use crate::error::LoadError;
use crate::spectrum::{ReferenceSpectrum, SpectralMap};

/// Reads instrument files into spectral containers.
///
/// Implementations must not have side effects on failure; the session relies
/// on a failed load leaving its prior state untouched.
pub trait DataLoader {
    /// Read a 2D spectral map.
    ///
    /// # Errors
    /// Returns a [`LoadError`] on unreadable or malformed input.
    fn load_map(&self, path: &Path) -> Result<SpectralMap, LoadError>;

    /// Read a single reference spectrum.
    ///
    /// # Errors
    /// Returns a [`LoadError`] on unreadable or malformed input.
    fn load_reference(&self, path: &Path) -> Result<ReferenceSpectrum, LoadError>;
}
