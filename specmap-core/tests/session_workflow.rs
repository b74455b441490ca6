#![allow(clippy::float_cmp)]
use std::path::{Path, PathBuf};

use specmap_core::{
    AxisData, CalibrationEngine, CalibrationError, CalibrationInfo, CalibrationStatus, Controller,
    DataLoader, DropGeometry, Error, Event, FitDiagnostics, FitFailure, FitOutcome, FitRequest,
    Key, LoadError, PlatformFamily, ReferenceSpectrum, RenderCommand, SessionConfig,
    SpectralMap, SpectrumDraw,
};

/// Serves a 3-row, 4-channel map and a 4-channel reference.
struct MemoryLoader;

impl DataLoader for MemoryLoader {
    fn load_map(&self, path: &Path) -> Result<SpectralMap, LoadError> {
        if path.ends_with("missing.txt") {
            return Err(LoadError::Empty);
        }
        SpectralMap::from_rows(vec![
            vec![10.0, 11.0, 12.0, 13.0],
            vec![20.0, 21.0, 22.0, 23.0],
            vec![30.0, 31.5, 32.0, 33.0],
        ])
    }

    fn load_reference(&self, path: &Path) -> Result<ReferenceSpectrum, LoadError> {
        if path.ends_with("missing.txt") {
            return Err(LoadError::Empty);
        }
        ReferenceSpectrum::new(vec![0.0, 5.0, 0.0, 1.0])
    }
}

/// Engine returning a fixed linear axis, or failing on request.
#[derive(Default)]
struct StubEngine {
    dimensions: Vec<u32>,
    materials: Vec<String>,
    functions: Vec<String>,
    fail: bool,
    resets: usize,
    last_center_axis: Option<AxisData>,
}

impl StubEngine {
    fn new() -> Self {
        Self {
            dimensions: vec![1, 2],
            materials: vec!["Ne".into(), "Ar".into()],
            functions: vec!["Gaussian".into()],
            ..Self::default()
        }
    }
}

impl CalibrationEngine for StubEngine {
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
        self.resets += 1;
    }

    fn initial_axis(&self, center: f64, channel_count: usize) -> AxisData {
        AxisData::from(
            (0..channel_count)
                .map(|i| center + f64::from(u32::try_from(i).unwrap()))
                .collect::<Vec<_>>(),
        )
    }

    fn fit(
        &mut self,
        reference: &ReferenceSpectrum,
        request: &FitRequest<'_>,
    ) -> Result<FitOutcome, FitFailure> {
        assert!(request.easy);
        self.last_center_axis = Some(request.initial_axis.clone());
        if self.fail {
            return Err(FitFailure::PeaksNotFound {
                found: 0,
                required: 2,
            });
        }
        let axis: Vec<f64> = (0..reference.channel_count())
            .map(|i| 600.0 + 0.5 * f64::from(u32::try_from(i).unwrap()))
            .collect();
        Ok(FitOutcome {
            axis: AxisData::from(axis),
            info: CalibrationInfo::new(format!("{}, dim={}", request.material, request.dimension)),
            diagnostics: FitDiagnostics::default(),
        })
    }
}

fn controller() -> Controller<MemoryLoader, StubEngine> {
    let mut config = SessionConfig::default();
    config.drop = DropGeometry::for_platform(PlatformFamily::Other).with_canvas(0.0, 450.0);
    Controller::new(&config, MemoryLoader, StubEngine::new())
}

fn drop_event(path: &str, relative: f64) -> Event {
    Event::Drop {
        path: PathBuf::from(path),
        drop_y: 100.0 + relative * 450.0,
        window_top: 100.0,
    }
}

#[test]
fn test_drop_routes_by_position() {
    let mut ctl = controller();
    ctl.handle(drop_event("map.txt", 0.4)).unwrap();
    assert!(ctl.session().map().is_some());
    assert!(ctl.session().reference().is_none());

    ctl.handle(drop_event("Ar_lamp.txt", 0.6)).unwrap();
    assert!(ctl.session().reference().is_some());
    assert_eq!(ctl.session().draft().material.as_deref(), Some("Ar"));
}

#[test]
fn test_defaults_filled_from_engine() {
    let ctl = controller();
    let draft = ctl.session().draft();
    assert_eq!(draft.dimension, Some(1));
    assert_eq!(draft.material.as_deref(), Some("Ne"));
    assert_eq!(draft.function.as_deref(), Some("Gaussian"));
}

#[test]
fn test_calibrate_without_reference_is_rejected() {
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    let err = ctl.handle(Event::Calibrate).unwrap_err();
    assert!(matches!(
        err,
        Error::Calibration(CalibrationError::MissingReference)
    ));
    assert_eq!(ctl.engine().resets, 0);
    assert!(!ctl.session().can_calibrate());
}

#[test]
fn test_calibration_changes_axis_only() {
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::LoadReference("ref.txt".into())).unwrap();
    let map_before = ctl.session().map().cloned();
    let ref_before = ctl.session().reference().cloned();

    let commands = ctl.handle(Event::Calibrate).unwrap();
    assert_eq!(commands[0], RenderCommand::FitResult);
    assert!(matches!(commands[1], RenderCommand::Map { .. }));

    let session = ctl.session();
    assert_eq!(session.axis().values(), &[600.0, 600.5, 601.0, 601.5]);
    assert_eq!(session.map().cloned(), map_before);
    assert_eq!(session.reference().cloned(), ref_before);
    assert_eq!(session.calibration_descriptor(), "Ne, dim=1");
    assert!(session.last_fit().is_some());
    assert_eq!(session.drawn_line(), None);
    assert_eq!(ctl.engine().resets, 1);
    let initial = ctl.engine().last_center_axis.as_ref().unwrap();
    assert_eq!(initial.values()[0], 630.0);
}

#[test]
fn test_first_row_change_after_calibration_is_full_redraw() {
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::SetAutoscale(false)).unwrap();
    ctl.handle(Event::LoadReference("ref.txt".into())).unwrap();
    ctl.handle(Event::Calibrate).unwrap();

    let commands = ctl.handle(Event::Key(Key::Up)).unwrap();
    assert!(commands.contains(&RenderCommand::Spectrum {
        row: 1,
        draw: SpectrumDraw::FullRedraw
    }));
    let commands = ctl.handle(Event::Key(Key::Up)).unwrap();
    assert!(commands.contains(&RenderCommand::Spectrum {
        row: 2,
        draw: SpectrumDraw::ReplaceLine
    }));
}

#[test]
fn test_failed_calibration_leaves_session_unchanged() {
    let mut config = SessionConfig::default();
    config.calibration.material = Some("Ar".into());
    let engine = StubEngine {
        fail: true,
        ..StubEngine::new()
    };
    let mut ctl = Controller::new(&config, MemoryLoader, engine);
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::LoadReference("ref.txt".into())).unwrap();

    let err = ctl.handle(Event::Calibrate).unwrap_err();
    assert!(matches!(
        err,
        Error::Calibration(CalibrationError::Fit(FitFailure::PeaksNotFound { .. }))
    ));
    assert_eq!(ctl.session().axis().values(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(*ctl.session().status(), CalibrationStatus::Uncalibrated);
}

#[test]
fn test_unsupported_parameter_is_rejected() {
    let mut ctl = controller();
    ctl.handle(Event::LoadReference("ref.txt".into())).unwrap();
    ctl.session_mut().draft_mut().dimension = Some(7);
    let err = ctl.handle(Event::Calibrate).unwrap_err();
    assert!(matches!(
        err,
        Error::Calibration(CalibrationError::UnsupportedParameter {
            kind: "dimension",
            ..
        })
    ));
}

#[test]
fn test_new_map_resets_calibration() {
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::LoadReference("ref.txt".into())).unwrap();
    ctl.handle(Event::Calibrate).unwrap();
    ctl.handle(Event::PlotClick { y: 2.0 }).unwrap();
    assert!(ctl.session().status().is_calibrated());

    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    assert_eq!(*ctl.session().status(), CalibrationStatus::Uncalibrated);
    assert_eq!(ctl.session().current_row(), Some(0));
    assert_eq!(ctl.session().axis().values(), &[0.0, 1.0, 2.0, 3.0]);
    assert!(ctl.session().last_fit().is_none());
}

#[test]
fn test_failed_load_keeps_previous_map() {
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::Key(Key::Up)).unwrap();
    assert!(ctl.handle(Event::LoadMap("missing.txt".into())).is_err());
    assert_eq!(ctl.session().current_row(), Some(1));
    assert!(ctl.session().map_path().unwrap().ends_with("map.txt"));
}

#[test]
fn test_export_duplicate_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::LoadReference("ref.txt".into())).unwrap();
    ctl.handle(Event::Calibrate).unwrap();

    ctl.handle(Event::PlotClick { y: 2.0 }).unwrap();
    ctl.handle(Event::AddCurrent).unwrap();
    ctl.handle(Event::AddCurrent).unwrap();
    ctl.handle(Event::PlotClick { y: 0.0 }).unwrap();
    ctl.handle(Event::AddCurrent).unwrap();
    assert_eq!(ctl.session().queue().rows(), &[2, 2, 0]);

    let summary = ctl.export(Some(dir.path())).unwrap();
    assert_eq!(summary.written.len(), 3);
    assert_eq!(summary.overwritten, 1);
    assert_eq!(ctl.session().queue().rows(), &[2, 2, 0]);

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["0.txt", "2.txt"]);

    let text = std::fs::read_to_string(dir.path().join("2.txt")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    let map_path = ctl.session().map_path().unwrap().display().to_string();
    let ref_path = ctl.session().reference_path().unwrap().display().to_string();
    assert_eq!(lines[0], format!("# abs_path_raw: {map_path}"));
    assert_eq!(lines[1], format!("# abs_path_ref: {ref_path}"));
    assert_eq!(lines[2], "# calibration: Ne, dim=1");
    assert_eq!(lines[3], "");
    assert_eq!(&lines[4..], &["600.0,30.0", "600.5,31.5", "601.0,32.0", "601.5,33.0"]);
    assert!(text.ends_with("601.5,33.0\n"));
}

#[test]
fn test_export_uncalibrated_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::AddCurrent).unwrap();
    ctl.handle(Event::Export {
        destination: Some(dir.path().to_path_buf()),
    })
    .unwrap();

    let text = std::fs::read_to_string(dir.path().join("0.txt")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "# abs_path_ref: ");
    assert_eq!(lines[2], "# calibration: ");
    assert_eq!(&lines[4..], &["0.0,10.0", "1.0,11.0", "2.0,12.0", "3.0,13.0"]);
}

#[test]
fn test_export_cancelled_writes_nothing() {
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::AddAll).unwrap();
    assert!(ctl.handle(Event::Export { destination: None }).unwrap().is_empty());
    assert!(ctl.export(None).unwrap().written.is_empty());
}

#[test]
fn test_add_all_then_delete_all() {
    let mut ctl = controller();
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    ctl.handle(Event::AddAll).unwrap();
    assert_eq!(ctl.session().queue().rows(), &[0, 1, 2]);

    ctl.handle(Event::DeleteQueued {
        positions: vec![0, 1, 2],
        confirmed: false,
    })
    .unwrap();
    assert_eq!(ctl.session().queue().len(), 3);

    ctl.handle(Event::DeleteQueued {
        positions: vec![0, 1, 2],
        confirmed: true,
    })
    .unwrap();
    assert!(ctl.session().queue().is_empty());
}

#[test]
fn test_enter_and_color_range_redraw_map() {
    let mut ctl = controller();
    assert!(ctl.handle(Event::Key(Key::Enter)).unwrap().is_empty());
    ctl.handle(Event::LoadMap("map.txt".into())).unwrap();
    let range = specmap_core::ColorRange { min: 5.0, max: 25.0 };
    let commands = ctl.handle(Event::ApplyColorRange(range)).unwrap();
    assert_eq!(
        commands,
        vec![RenderCommand::Map {
            range,
            colormap: specmap_core::Colormap::Hot,
            marker: Some(0),
        }]
    );
    assert_eq!(ctl.handle(Event::Key(Key::Enter)).unwrap(), commands);
}
