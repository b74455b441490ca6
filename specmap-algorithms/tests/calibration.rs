use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use specmap_algorithms::{line_list, LampCalibrator};
use specmap_core::{
    CalibrationEngine, CalibrationError, Controller, DataLoader, Error, Event, FitFailure,
    FitRequest, LoadError, ReferenceSpectrum, SessionConfig, SpectralMap,
};

const CHANNELS: usize = 1000;
const TRUE_OFFSET: f64 = 579.5;
const TRUE_DISPERSION: f64 = 0.1002;

#[allow(clippy::cast_precision_loss)]
fn true_wavelength(channel: usize) -> f64 {
    TRUE_OFFSET + TRUE_DISPERSION * channel as f64
}

/// Neon lamp spectrum on a known linear axis, Gaussian lines with no baseline.
#[allow(clippy::cast_precision_loss)]
fn neon_spectrum() -> Vec<f64> {
    let lines = line_list("Ne").unwrap().lines;
    (0..CHANNELS)
        .map(|i| {
            lines
                .iter()
                .map(|&wl| {
                    let center = (wl - TRUE_OFFSET) / TRUE_DISPERSION;
                    let d = (i as f64 - center) / 1.5;
                    1000.0 * (-0.5 * d * d).exp()
                })
                .sum::<f64>()
        })
        .collect()
}

fn request<'a>(axis: &'a specmap_core::AxisData, material: &'a str, dimension: u32) -> FitRequest<'a> {
    FitRequest {
        initial_axis: axis,
        dimension,
        material,
        function: "Gaussian",
        search_width: 10.0,
        easy: true,
    }
}

#[test]
fn test_recovers_linear_axis() {
    let mut engine = LampCalibrator::default();
    let reference = ReferenceSpectrum::new(neon_spectrum()).unwrap();
    let axis = engine.initial_axis(630.0, CHANNELS);

    let outcome = engine.fit(&reference, &request(&axis, "Ne", 1)).unwrap();

    assert_eq!(outcome.axis.len(), CHANNELS);
    for channel in [0, 250, 500, 999] {
        assert_abs_diff_eq!(
            outcome.axis.values()[channel],
            true_wavelength(channel),
            epsilon = 1e-3
        );
    }
    assert_abs_diff_eq!(outcome.diagnostics.coefficients[1], TRUE_DISPERSION, epsilon = 1e-6);
    assert!(outcome.diagnostics.rms < 1e-3);
    assert!(outcome.diagnostics.peaks.len() > 10);
    assert!(outcome.info.as_str().starts_with("Ne, Gaussian, dim=1, "));
    assert_eq!(engine.matched_peaks().len(), outcome.diagnostics.peaks.len());

    engine.reset();
    assert!(engine.matched_peaks().is_empty());
}

#[test]
fn test_quadratic_fit_on_linear_data() {
    let mut engine = LampCalibrator::default();
    let reference = ReferenceSpectrum::new(neon_spectrum()).unwrap();
    let axis = engine.initial_axis(630.0, CHANNELS);

    let outcome = engine.fit(&reference, &request(&axis, "Ne", 2)).unwrap();

    assert_eq!(outcome.diagnostics.coefficients.len(), 3);
    assert_abs_diff_eq!(outcome.diagnostics.coefficients[2], 0.0, epsilon = 1e-8);
    assert_abs_diff_eq!(outcome.axis.values()[500], true_wavelength(500), epsilon = 1e-3);
}

#[test]
fn test_no_lines_in_range() {
    let mut engine = LampCalibrator::default();
    let reference = ReferenceSpectrum::new(neon_spectrum()).unwrap();
    let axis = engine.initial_axis(630.0, CHANNELS);

    // mercury has no lines between 580 and 680 nm
    let err = engine.fit(&reference, &request(&axis, "Hg", 1)).unwrap_err();
    assert_eq!(
        err,
        FitFailure::PeaksNotFound {
            found: 0,
            required: 2
        }
    );
}

#[test]
fn test_flat_reference_finds_nothing() {
    let mut engine = LampCalibrator::default();
    let reference = ReferenceSpectrum::new(vec![3.0; CHANNELS]).unwrap();
    let axis = engine.initial_axis(630.0, CHANNELS);

    let err = engine.fit(&reference, &request(&axis, "Ne", 1)).unwrap_err();
    assert!(matches!(err, FitFailure::PeaksNotFound { found: 0, .. }));
    assert!(err.to_string().starts_with("peaks not found"));
}

#[test]
fn test_unknown_material() {
    let mut engine = LampCalibrator::default();
    let reference = ReferenceSpectrum::new(neon_spectrum()).unwrap();
    let axis = engine.initial_axis(630.0, CHANNELS);

    let err = engine.fit(&reference, &request(&axis, "Zz", 1)).unwrap_err();
    assert_eq!(err, FitFailure::UnknownMaterial("Zz".to_string()));
}

/// Serves a 2-row map of the right width and the synthetic neon reference.
struct SyntheticLoader;

impl DataLoader for SyntheticLoader {
    fn load_map(&self, _path: &Path) -> Result<SpectralMap, LoadError> {
        SpectralMap::from_rows(vec![vec![1.0; CHANNELS], vec![2.0; CHANNELS]])
    }

    fn load_reference(&self, _path: &Path) -> Result<ReferenceSpectrum, LoadError> {
        ReferenceSpectrum::new(neon_spectrum())
    }
}

#[test]
fn test_calibrate_through_controller() {
    let mut controller = Controller::new(
        &SessionConfig::default(),
        SyntheticLoader,
        LampCalibrator::default(),
    );
    controller
        .handle(Event::LoadMap(PathBuf::from("map.txt")))
        .unwrap();
    controller
        .handle(Event::LoadReference(PathBuf::from("Ne_lamp.txt")))
        .unwrap();
    assert_eq!(controller.session().draft().material.as_deref(), Some("Ne"));
    controller.session_mut().draft_mut().function = Some("Gaussian".to_string());

    controller.handle(Event::Calibrate).unwrap();

    let session = controller.session();
    assert!(session.status().is_calibrated());
    assert_abs_diff_eq!(session.axis().values()[100], true_wavelength(100), epsilon = 1e-3);
    assert!(session.last_fit().is_some());
}

#[test]
fn test_failed_calibration_keeps_index_axis() {
    let mut controller = Controller::new(
        &SessionConfig::default(),
        SyntheticLoader,
        LampCalibrator::default(),
    );
    controller
        .handle(Event::LoadMap(PathBuf::from("map.txt")))
        .unwrap();
    controller
        .handle(Event::LoadReference(PathBuf::from("lamp.txt")))
        .unwrap();
    controller.session_mut().draft_mut().material = Some("Hg".to_string());

    let err = controller.handle(Event::Calibrate).unwrap_err();
    assert!(matches!(
        err,
        Error::Calibration(CalibrationError::Fit(FitFailure::PeaksNotFound { .. }))
    ));
    let session = controller.session();
    assert!(!session.status().is_calibrated());
    assert_abs_diff_eq!(session.axis().values()[7], 7.0);
}
