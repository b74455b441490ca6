//! Wavelength calibration: parameters, status, engine interface, orchestration.

mod engine;
mod orchestrator;

pub use engine::{CalibrationEngine, FitDiagnostics, FitOutcome, FitRequest, FittedPeak};
pub use orchestrator::CalibrationOrchestrator;

use std::fmt;

use crate::error::CalibrationError;

/// Opaque human-readable description of an applied calibration.
///
/// Written verbatim into export headers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalibrationInfo(String);

impl CalibrationInfo {
    /// Wrap a descriptor string.
    #[must_use]
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    /// Descriptor text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalibrationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the current axis comes from a successful calibration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalibrationStatus {
    #[default]
    Uncalibrated,
    Calibrated(CalibrationInfo),
}

impl CalibrationStatus {
    /// Descriptor of the applied calibration, if any.
    #[must_use]
    pub fn info(&self) -> Option<&CalibrationInfo> {
        match self {
            Self::Uncalibrated => None,
            Self::Calibrated(info) => Some(info),
        }
    }

    /// Whether a calibration has been applied.
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        matches!(self, Self::Calibrated(_))
    }
}

/// Fully specified calibration request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationParameters {
    /// Center wavelength of the initial axis guess, in nm.
    pub center: f64,
    /// Polynomial dimension of the fit.
    pub dimension: u32,
    /// Calibration material (line list) name.
    pub material: String,
    /// Peak-shape function name.
    pub function: String,
    /// Half-width of the peak search window, in channels.
    pub search_width: f64,
}

impl CalibrationParameters {
    /// Check every value against the engine's advertised sets.
    ///
    /// # Errors
    /// Returns [`CalibrationError::UnsupportedParameter`] naming the first
    /// offending field.
    pub fn validate<E: CalibrationEngine + ?Sized>(
        &self,
        engine: &E,
    ) -> Result<(), CalibrationError> {
        if !engine.dimensions().contains(&self.dimension) {
            return Err(CalibrationError::UnsupportedParameter {
                kind: "dimension",
                value: self.dimension.to_string(),
            });
        }
        if !engine.materials().iter().any(|m| *m == self.material) {
            return Err(CalibrationError::UnsupportedParameter {
                kind: "material",
                value: self.material.clone(),
            });
        }
        if !engine.functions().iter().any(|f| *f == self.function) {
            return Err(CalibrationError::UnsupportedParameter {
                kind: "function",
                value: self.function.clone(),
            });
        }
        if !self.center.is_finite() {
            return Err(CalibrationError::UnsupportedParameter {
                kind: "center",
                value: self.center.to_string(),
            });
        }
        if !(self.search_width.is_finite() && self.search_width > 0.0) {
            return Err(CalibrationError::UnsupportedParameter {
                kind: "search width",
                value: self.search_width.to_string(),
            });
        }
        Ok(())
    }
}

/// Calibration parameters as currently chosen in the UI.
///
/// Any field may still be unset; [`CalibrationDraft::to_parameters`] enforces
/// that all are set before an attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalibrationDraft {
    pub center: Option<f64>,
    pub dimension: Option<u32>,
    pub material: Option<String>,
    pub function: Option<String>,
    pub search_width: Option<f64>,
}

impl CalibrationDraft {
    /// Fill unset dimension, material and function with the engine's first
    /// advertised value.
    pub fn fill_defaults<E: CalibrationEngine + ?Sized>(&mut self, engine: &E) {
        if self.dimension.is_none() {
            self.dimension = engine.dimensions().first().copied();
        }
        if self.material.is_none() {
            self.material = engine.materials().first().cloned();
        }
        if self.function.is_none() {
            self.function = engine.functions().first().cloned();
        }
    }

    /// Complete parameters, if every field is set.
    ///
    /// # Errors
    /// Returns [`CalibrationError::MissingParameter`] naming the first unset field.
    pub fn to_parameters(&self) -> Result<CalibrationParameters, CalibrationError> {
        Ok(CalibrationParameters {
            center: self
                .center
                .ok_or(CalibrationError::MissingParameter("center"))?,
            dimension: self
                .dimension
                .ok_or(CalibrationError::MissingParameter("dimension"))?,
            material: self
                .material
                .clone()
                .ok_or(CalibrationError::MissingParameter("material"))?,
            function: self
                .function
                .clone()
                .ok_or(CalibrationError::MissingParameter("function"))?,
            search_width: self
                .search_width
                .ok_or(CalibrationError::MissingParameter("search width"))?,
        })
    }
}

/// First advertised material whose name occurs in `file_name`.
///
/// Matching is a case-sensitive substring test in advertised order.
#[must_use]
pub fn infer_material<'a>(file_name: &str, materials: &'a [String]) -> Option<&'a str> {
    materials
        .iter()
        .find(|m| !m.is_empty() && file_name.contains(m.as_str()))
        .map(String::as_str)
}
