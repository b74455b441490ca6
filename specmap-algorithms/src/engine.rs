//! Lamp-line calibration engine.

use log::debug;
use specmap_core::{
    AxisData, CalibrationEngine, CalibrationInfo, FitDiagnostics, FitFailure, FitOutcome,
    FitRequest, FittedPeak, ReferenceSpectrum,
};

use crate::lines::{line_list, LINE_LISTS};
use crate::peaks::{find_peak, PeakSearch, PeakShape};
use crate::polyfit::polyfit;

/// Polynomial dimensions offered by [`LampCalibrator`].
pub const DIMENSIONS: [u32; 3] = [1, 2, 3];

/// Tunables of the lamp calibrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LampCalibratorConfig {
    /// Nominal dispersion of the initial axis guess, nm per channel.
    pub dispersion: f64,
    /// Strict mode peak prominence (fraction of the intensity span).
    pub prominence: f64,
}

impl Default for LampCalibratorConfig {
    fn default() -> Self {
        Self {
            dispersion: 0.1,
            prominence: 0.05,
        }
    }
}

/// Calibrates a wavelength axis against the emission lines of a lamp.
///
/// Each known line inside the initial axis range is looked up in the
/// reference spectrum within the search width, refined with the selected
/// peak shape, and a polynomial of the requested dimension is fitted from
/// channel to wavelength.
#[derive(Debug, Clone)]
pub struct LampCalibrator {
    config: LampCalibratorConfig,
    dimensions: Vec<u32>,
    materials: Vec<String>,
    functions: Vec<String>,
    /// Peaks matched by the most recent fit.
    matched: Vec<FittedPeak>,
}

impl Default for LampCalibrator {
    fn default() -> Self {
        Self::new(LampCalibratorConfig::default())
    }
}

impl LampCalibrator {
    /// Create a calibrator with the built-in line lists.
    #[must_use]
    pub fn new(config: LampCalibratorConfig) -> Self {
        Self {
            config,
            dimensions: DIMENSIONS.to_vec(),
            materials: LINE_LISTS.iter().map(|l| l.name.to_string()).collect(),
            functions: PeakShape::ALL.iter().map(|s| s.name().to_string()).collect(),
            matched: Vec::new(),
        }
    }

    /// Peaks matched by the most recent fit (empty after [`reset`](CalibrationEngine::reset)).
    #[must_use]
    pub fn matched_peaks(&self) -> &[FittedPeak] {
        &self.matched
    }
}

impl CalibrationEngine for LampCalibrator {
    fn dimensions(&self) -> &[u32] {
        &self.dimensions
    }

    fn materials(&self) -> &[String] {
        &self.materials
    }

    fn functions(&self) -> &[String] {
        &self.functions
    }

    fn reset(&mut self) {
        self.matched.clear();
    }

    #[allow(clippy::cast_precision_loss)]
    fn initial_axis(&self, center: f64, channel_count: usize) -> AxisData {
        let half = channel_count as f64 / 2.0;
        AxisData::from(
            (0..channel_count)
                .map(|i| center + (i as f64 - half) * self.config.dispersion)
                .collect::<Vec<_>>(),
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn fit(
        &mut self,
        reference: &ReferenceSpectrum,
        request: &FitRequest<'_>,
    ) -> Result<FitOutcome, FitFailure> {
        let lines = line_list(request.material)
            .ok_or_else(|| FitFailure::UnknownMaterial(request.material.to_string()))?;
        let shape: PeakShape = request.function.parse().unwrap_or(PeakShape::Gaussian);
        let values = reference.values().to_vec();
        let axis = request.initial_axis.values();
        let degree = request.dimension as usize;
        let required = degree + 1;

        let search = PeakSearch {
            search_width: request.search_width,
            easy: request.easy,
            prominence: self.config.prominence,
        };

        let mut found: Vec<(f64, f64)> = Vec::new();
        for &wavelength in lines.lines {
            let Some(expected) = channel_of(axis, wavelength) else {
                continue;
            };
            let Some(channel) = find_peak(&values, expected, &search, shape) else {
                continue;
            };
            // two lines resolving to the same peak: keep the closer guess
            if let Some(prev) = found.iter_mut().find(|(c, _)| (c - channel).abs() < 0.5) {
                let prev_expected = channel_of(axis, prev.1).unwrap_or(f64::INFINITY);
                if (expected - channel).abs() < (prev_expected - channel).abs() {
                    *prev = (channel, wavelength);
                }
                continue;
            }
            found.push((channel, wavelength));
        }
        debug!(
            "{}: {} of {} lines located",
            lines.name,
            found.len(),
            lines.lines.len()
        );

        if found.len() < required {
            return Err(FitFailure::PeaksNotFound {
                found: found.len(),
                required,
            });
        }

        let (channels, wavelengths): (Vec<f64>, Vec<f64>) = found.iter().copied().unzip();
        let poly = polyfit(&channels, &wavelengths, degree).ok_or(FitFailure::Singular)?;

        self.matched = found
            .iter()
            .map(|&(channel, wavelength)| FittedPeak {
                channel,
                wavelength,
                residual: poly.eval(channel) - wavelength,
            })
            .collect();
        let rms = (self.matched.iter().map(|p| p.residual * p.residual).sum::<f64>()
            / self.matched.len() as f64)
            .sqrt();

        let calibrated: Vec<f64> = (0..values.len()).map(|i| poly.eval(i as f64)).collect();
        let info = CalibrationInfo::new(format!(
            "{}, {}, dim={}, {} peaks, rms={:.4} nm",
            lines.name,
            shape,
            request.dimension,
            self.matched.len(),
            rms
        ));

        Ok(FitOutcome {
            axis: AxisData::from(calibrated),
            info,
            diagnostics: FitDiagnostics {
                peaks: self.matched.clone(),
                coefficients: poly.coefficients().to_vec(),
                rms,
            },
        })
    }
}

/// Fractional channel at which a monotonic `axis` reaches `wavelength`.
#[allow(clippy::cast_precision_loss)]
fn channel_of(axis: &[f64], wavelength: f64) -> Option<f64> {
    let (&first, &last) = (axis.first()?, axis.last()?);
    let ascending = last >= first;
    let (lo, hi) = if ascending { (first, last) } else { (last, first) };
    if !(lo..=hi).contains(&wavelength) || axis.len() < 2 {
        return None;
    }
    let upper = axis.partition_point(|&v| if ascending { v < wavelength } else { v > wavelength });
    if upper == 0 {
        return Some(0.0);
    }
    let (a, b) = (axis[upper - 1], axis[upper.min(axis.len() - 1)]);
    let span = b - a;
    let frac = if span.abs() < f64::EPSILON {
        0.0
    } else {
        (wavelength - a) / span
    };
    Some((upper - 1) as f64 + frac)
}
