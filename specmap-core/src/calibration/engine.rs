//! Calibration engine interface.

use crate::calibration::CalibrationInfo;
use crate::error::FitFailure;
use crate::spectrum::{AxisData, ReferenceSpectrum};

/// One fit request, assembled by the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct FitRequest<'a> {
    /// Initial axis guess derived from the chosen center wavelength.
    pub initial_axis: &'a AxisData,
    /// Polynomial dimension.
    pub dimension: u32,
    /// Material (line list) name.
    pub material: &'a str,
    /// Peak-shape function name.
    pub function: &'a str,
    /// Half-width of the peak search window, in channels.
    pub search_width: f64,
    /// Tolerate imprecise initial peak locations.
    pub easy: bool,
}

/// A reference peak matched to a known line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedPeak {
    /// Refined peak position in (fractional) channels.
    pub channel: f64,
    /// Known line wavelength.
    pub wavelength: f64,
    /// Fitted minus known wavelength.
    pub residual: f64,
}

/// Data backing the fit-diagnostic plot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FitDiagnostics {
    /// Matched peaks.
    pub peaks: Vec<FittedPeak>,
    /// Polynomial coefficients, lowest order first.
    pub coefficients: Vec<f64>,
    /// Root-mean-square residual in nm.
    pub rms: f64,
}

/// Successful fit result.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// Calibrated axis, same length as the reference.
    pub axis: AxisData,
    /// Descriptor persisted into export headers.
    pub info: CalibrationInfo,
    /// Fit diagnostics for display.
    pub diagnostics: FitDiagnostics,
}

/// External calibration engine.
///
/// The engine advertises the parameter values it accepts; advertised order
/// is significant (first entries are defaults, material inference scans in
/// order).
pub trait CalibrationEngine {
    /// Allowed polynomial dimensions.
    fn dimensions(&self) -> &[u32];

    /// Allowed materials.
    fn materials(&self) -> &[String];

    /// Allowed peak-shape functions.
    fn functions(&self) -> &[String];

    /// Drop any working state from a previous calibration.
    fn reset(&mut self);

    /// Initial axis guess centered on `center`.
    fn initial_axis(&self, center: f64, channel_count: usize) -> AxisData;

    /// Fit the reference spectrum.
    ///
    /// # Errors
    /// Returns a [`FitFailure`] when no usable peaks are found or the fit
    /// does not converge.
    fn fit(
        &mut self,
        reference: &ReferenceSpectrum,
        request: &FitRequest<'_>,
    ) -> Result<FitOutcome, FitFailure>;
}
