//! The spectral session aggregate.
//!
//! Owns every piece of mutable state: the loaded map and reference, the
//! wavelength axis, calibration status, navigation cursor, export queue,
//! calibration parameter choices, and display settings. Transitions return
//! the [`RenderCommand`]s the plot renderer has to execute.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::calibration::{
    infer_material, CalibrationDraft, CalibrationInfo, CalibrationStatus, FitDiagnostics,
    FitOutcome,
};
use crate::config::SessionConfig;
use crate::cursor::{Direction, NavigationCursor};
use crate::display::{ColorRange, Colormap, DisplaySettings};
use crate::error::Result;
use crate::loader::DataLoader;
use crate::queue::{Confirm, SelectionQueue};
use crate::render::{LineCache, RenderCommand};
use crate::spectrum::{AxisData, ReferenceSpectrum, SpectralMap};

/// Single-document session state.
#[derive(Debug, Clone)]
pub struct SpectralSession {
    map: Option<SpectralMap>,
    reference: Option<ReferenceSpectrum>,
    axis: AxisData,
    status: CalibrationStatus,
    cursor: NavigationCursor,
    queue: SelectionQueue,
    map_path: Option<PathBuf>,
    reference_path: Option<PathBuf>,
    source_folder: PathBuf,
    draft: CalibrationDraft,
    display: DisplaySettings,
    line: LineCache,
    last_fit: Option<FitDiagnostics>,
}

impl Default for SpectralSession {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl SpectralSession {
    /// Create an empty session.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            map: None,
            reference: None,
            axis: AxisData::default(),
            status: CalibrationStatus::Uncalibrated,
            cursor: NavigationCursor::default(),
            queue: SelectionQueue::default(),
            map_path: None,
            reference_path: None,
            source_folder: PathBuf::from("./"),
            draft: config.calibration.draft(),
            display: config.display,
            line: LineCache::default(),
            last_fit: None,
        }
    }

    // ---- loading ----

    /// Load a new spectral map, replacing the current one.
    ///
    /// Resets calibration status, axis, cursor and the cached 1D line. The
    /// export queue is kept. On loader failure nothing changes.
    ///
    /// # Errors
    /// Returns [`Error::Load`](crate::Error::Load) if the loader fails.
    pub fn load_map<L: DataLoader + ?Sized>(
        &mut self,
        loader: &L,
        path: &Path,
    ) -> Result<Vec<RenderCommand>> {
        let map = loader.load_map(path)?;
        let path = resolve(path);
        info!(
            "loaded map {} ({} rows x {} channels)",
            path.display(),
            map.row_count(),
            map.channel_count()
        );

        self.axis = AxisData::index(map.channel_count());
        self.status = CalibrationStatus::Uncalibrated;
        self.last_fit = None;
        self.cursor.reset(map.row_count());
        self.line.invalidate();
        self.display.color_range = ColorRange::of_map(&map);
        self.source_folder = path
            .parent()
            .map_or_else(|| PathBuf::from("./"), Path::to_path_buf);
        self.map_path = Some(path);
        self.map = Some(map);

        let mut commands = vec![self.map_command()];
        commands.extend(self.redraw_current());
        Ok(commands)
    }

    /// Load a new reference spectrum, replacing the current one.
    ///
    /// The first of `materials` contained in the file name becomes the
    /// selected calibration material. Map, cursor and queue are untouched.
    ///
    /// # Errors
    /// Returns [`Error::Load`](crate::Error::Load) if the loader fails.
    pub fn load_reference<L: DataLoader + ?Sized>(
        &mut self,
        loader: &L,
        path: &Path,
        materials: &[String],
    ) -> Result<Vec<RenderCommand>> {
        let reference = loader.load_reference(path)?;
        let path = resolve(path);
        info!(
            "loaded reference {} ({} channels)",
            path.display(),
            reference.channel_count()
        );

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(material) = infer_material(&file_name, materials) {
            debug!("material {material} inferred from {file_name}");
            self.draft.material = Some(material.to_string());
        }

        self.reference = Some(reference);
        self.reference_path = Some(path);
        self.line.invalidate();
        Ok(vec![RenderCommand::Reference])
    }

    // ---- calibration ----

    /// Whether the calibrate control should be enabled.
    #[must_use]
    pub fn can_calibrate(&self) -> bool {
        self.reference.is_some()
    }

    /// Adopt a successful fit. Only the calibration orchestrator calls this.
    pub(crate) fn apply_calibration(&mut self, outcome: FitOutcome) -> Vec<RenderCommand> {
        self.axis = outcome.axis;
        self.status = CalibrationStatus::Calibrated(outcome.info);
        self.last_fit = Some(outcome.diagnostics);
        self.line.invalidate();
        vec![RenderCommand::FitResult, self.map_command()]
    }

    // ---- navigation ----

    /// Jump to `row`; out-of-range rows are ignored.
    pub fn move_to(&mut self, row: usize) -> Vec<RenderCommand> {
        if self.cursor.move_to(row) {
            self.redraw_current()
        } else {
            Vec::new()
        }
    }

    /// Jump to the row under a clicked data-space y coordinate.
    pub fn move_to_coordinate(&mut self, y: f64) -> Vec<RenderCommand> {
        if self.cursor.move_to_coordinate(y) {
            self.redraw_current()
        } else {
            Vec::new()
        }
    }

    /// Step one row up or down.
    pub fn step(&mut self, direction: Direction) -> Vec<RenderCommand> {
        if self.cursor.step(direction) {
            self.redraw_current()
        } else {
            Vec::new()
        }
    }

    /// Commands redrawing the current row, following the autoscale policy.
    pub fn redraw_current(&mut self) -> Vec<RenderCommand> {
        let Some(row) = self.cursor.current() else {
            return Vec::new();
        };
        let draw = self.line.plan(row, self.display.autoscale);
        vec![
            RenderCommand::RowMarker(row),
            RenderCommand::Spectrum { row, draw },
        ]
    }

    // ---- export queue ----

    /// Queue the current row.
    pub fn add_current(&mut self) -> bool {
        self.queue.add_current(&self.cursor)
    }

    /// Queue every row of the loaded map. No-op without a map.
    pub fn add_all(&mut self) {
        if let Some(map) = &self.map {
            self.queue.add_all(map.row_count());
        }
    }

    /// Remove queue entries at `positions` after confirmation.
    pub fn delete_queued<C: Confirm>(&mut self, positions: &[usize], confirm: C) -> usize {
        self.queue.delete(positions, confirm)
    }

    // ---- display ----

    /// Command redrawing the 2D map. No-op without a map.
    pub fn draw_map(&self) -> Vec<RenderCommand> {
        if self.map.is_some() {
            vec![self.map_command()]
        } else {
            Vec::new()
        }
    }

    /// Change the color range (applied on the next map draw).
    pub fn set_color_range(&mut self, range: ColorRange) {
        self.display.color_range = range;
    }

    /// Change the color map and redraw the 2D map.
    pub fn set_colormap(&mut self, colormap: Colormap) -> Vec<RenderCommand> {
        self.display.colormap = colormap;
        self.draw_map()
    }

    /// Toggle 1D autoscaling.
    pub fn set_autoscale(&mut self, autoscale: bool) {
        self.display.autoscale = autoscale;
    }

    fn map_command(&self) -> RenderCommand {
        RenderCommand::Map {
            range: self.display.color_range,
            colormap: self.display.colormap,
            marker: self.cursor.current(),
        }
    }

    // ---- accessors ----

    /// Loaded spectral map.
    #[must_use]
    pub fn map(&self) -> Option<&SpectralMap> {
        self.map.as_ref()
    }

    /// Loaded reference spectrum.
    #[must_use]
    pub fn reference(&self) -> Option<&ReferenceSpectrum> {
        self.reference.as_ref()
    }

    /// Current wavelength axis.
    #[must_use]
    pub fn axis(&self) -> &AxisData {
        &self.axis
    }

    /// Calibration status of the current axis.
    #[must_use]
    pub fn status(&self) -> &CalibrationStatus {
        &self.status
    }

    /// Descriptor written into export headers (empty when uncalibrated).
    #[must_use]
    pub fn calibration_descriptor(&self) -> String {
        self.status
            .info()
            .map(CalibrationInfo::to_string)
            .unwrap_or_default()
    }

    /// Navigation cursor.
    #[must_use]
    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    /// Current row, if a map is loaded.
    #[must_use]
    pub fn current_row(&self) -> Option<usize> {
        self.cursor.current()
    }

    /// Export queue.
    #[must_use]
    pub fn queue(&self) -> &SelectionQueue {
        &self.queue
    }

    /// Absolute path of the loaded map file.
    #[must_use]
    pub fn map_path(&self) -> Option<&Path> {
        self.map_path.as_deref()
    }

    /// Absolute path of the loaded reference file.
    #[must_use]
    pub fn reference_path(&self) -> Option<&Path> {
        self.reference_path.as_deref()
    }

    /// Folder of the loaded map (default export location).
    #[must_use]
    pub fn source_folder(&self) -> &Path {
        &self.source_folder
    }

    /// Calibration parameter choices.
    #[must_use]
    pub fn draft(&self) -> &CalibrationDraft {
        &self.draft
    }

    /// Mutable calibration parameter choices.
    pub fn draft_mut(&mut self) -> &mut CalibrationDraft {
        &mut self.draft
    }

    /// Display settings.
    #[must_use]
    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    /// Diagnostics of the last successful fit.
    #[must_use]
    pub fn last_fit(&self) -> Option<&FitDiagnostics> {
        self.last_fit.as_ref()
    }

    /// Row of the spectrum line currently drawn on the 1D panel.
    #[must_use]
    pub fn drawn_line(&self) -> Option<usize> {
        self.line.drawn()
    }
}

/// Absolute form of `path`, falling back to the path as given.
fn resolve(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LoadError};
    use crate::render::SpectrumDraw;

    /// Loader serving fixed data keyed by file name.
    struct FixedLoader;

    impl DataLoader for FixedLoader {
        fn load_map(&self, path: &Path) -> std::result::Result<SpectralMap, LoadError> {
            match path.file_name().and_then(|n| n.to_str()) {
                Some("three.txt") => SpectralMap::from_rows(vec![
                    vec![1.0, 2.0],
                    vec![3.0, 4.0],
                    vec![5.0, 6.0],
                ]),
                Some("two.txt") => SpectralMap::from_rows(vec![vec![7.0; 4], vec![8.0; 4]]),
                _ => Err(LoadError::Empty),
            }
        }

        fn load_reference(&self, path: &Path) -> std::result::Result<ReferenceSpectrum, LoadError> {
            if path.to_string_lossy().contains("bad") {
                return Err(LoadError::Empty);
            }
            ReferenceSpectrum::new(vec![0.0, 1.0])
        }
    }

    fn materials() -> Vec<String> {
        vec!["Ne".to_string(), "Ar".to_string()]
    }

    #[test]
    fn test_load_map_resets_state() {
        let mut session = SpectralSession::default();
        let commands = session
            .load_map(&FixedLoader, Path::new("three.txt"))
            .unwrap();
        assert_eq!(session.current_row(), Some(0));
        assert_eq!(session.axis().values(), &[0.0, 1.0]);
        assert!(session.map_path().unwrap().is_absolute());
        assert!(matches!(commands[0], RenderCommand::Map { marker: Some(0), .. }));
        assert!(commands.contains(&RenderCommand::Spectrum {
            row: 0,
            draw: SpectrumDraw::FullRedraw
        }));
        let range = session.display().color_range;
        assert!((range.min - 1.0).abs() < f64::EPSILON);
        assert!((range.max - 6.0).abs() < f64::EPSILON);

        session.move_to(2);
        session.status = CalibrationStatus::Calibrated(CalibrationInfo::new("old"));
        session.load_map(&FixedLoader, Path::new("two.txt")).unwrap();
        assert_eq!(session.current_row(), Some(0));
        assert_eq!(*session.status(), CalibrationStatus::Uncalibrated);
        assert_eq!(session.axis().len(), 4);
        assert_eq!(session.calibration_descriptor(), "");
    }

    #[test]
    fn test_failed_map_load_keeps_state() {
        let mut session = SpectralSession::default();
        session.load_map(&FixedLoader, Path::new("three.txt")).unwrap();
        session.move_to(1);
        let before_path = session.map_path().map(Path::to_path_buf);

        let err = session
            .load_map(&FixedLoader, Path::new("broken.txt"))
            .unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::Empty)));
        assert_eq!(session.current_row(), Some(1));
        assert_eq!(session.map().unwrap().row_count(), 3);
        assert_eq!(session.map_path().map(Path::to_path_buf), before_path);
    }

    #[test]
    fn test_load_reference_infers_material() {
        let mut session = SpectralSession::default();
        session.draft_mut().material = Some("Ne".into());
        session
            .load_reference(&FixedLoader, Path::new("lamp_Ar_630.txt"), &materials())
            .unwrap();
        assert_eq!(session.draft().material.as_deref(), Some("Ar"));
        assert!(session.can_calibrate());

        session
            .load_reference(&FixedLoader, Path::new("lamp_630.txt"), &materials())
            .unwrap();
        assert_eq!(session.draft().material.as_deref(), Some("Ar"));
    }

    #[test]
    fn test_material_matched_on_file_name_only() {
        let mut session = SpectralSession::default();
        session.draft_mut().material = Some("Ar".into());
        session
            .load_reference(&FixedLoader, Path::new("Ne_runs/lamp.txt"), &materials())
            .unwrap();
        assert_eq!(session.draft().material.as_deref(), Some("Ar"));
    }

    #[test]
    fn test_failed_reference_load_keeps_state() {
        let mut session = SpectralSession::default();
        session.draft_mut().material = Some("Ne".into());
        assert!(session
            .load_reference(&FixedLoader, Path::new("bad_Ar.txt"), &materials())
            .is_err());
        assert!(!session.can_calibrate());
        assert_eq!(session.draft().material.as_deref(), Some("Ne"));
    }

    #[test]
    fn test_reference_load_does_not_touch_map_or_queue() {
        let mut session = SpectralSession::default();
        session.load_map(&FixedLoader, Path::new("three.txt")).unwrap();
        session.move_to(2);
        session.add_current();
        let commands = session
            .load_reference(&FixedLoader, Path::new("ref.txt"), &materials())
            .unwrap();
        assert_eq!(commands, vec![RenderCommand::Reference]);
        assert_eq!(session.current_row(), Some(2));
        assert_eq!(session.queue().rows(), &[2]);
        assert_eq!(session.drawn_line(), None);
    }

    #[test]
    fn test_navigation_redraw_policy() {
        let mut session = SpectralSession::default();
        session.load_map(&FixedLoader, Path::new("three.txt")).unwrap();
        session.set_autoscale(false);

        let commands = session.move_to(1);
        assert_eq!(
            commands,
            vec![
                RenderCommand::RowMarker(1),
                RenderCommand::Spectrum {
                    row: 1,
                    draw: SpectrumDraw::ReplaceLine
                }
            ]
        );
        assert!(session.move_to(5).is_empty());
        assert_eq!(session.current_row(), Some(1));

        session.set_autoscale(true);
        let commands = session.step(Direction::Up);
        assert!(commands.contains(&RenderCommand::Spectrum {
            row: 2,
            draw: SpectrumDraw::FullRedraw
        }));
        assert!(session.step(Direction::Up).is_empty());
    }

    #[test]
    fn test_navigation_without_map_is_noop() {
        let mut session = SpectralSession::default();
        assert!(session.move_to(0).is_empty());
        assert!(session.step(Direction::Up).is_empty());
        assert!(session.move_to_coordinate(0.0).is_empty());
        assert!(session.draw_map().is_empty());
        assert!(!session.add_current());
        session.add_all();
        assert!(session.queue().is_empty());
    }

    #[test]
    fn test_click_moves_cursor() {
        let mut session = SpectralSession::default();
        session.load_map(&FixedLoader, Path::new("three.txt")).unwrap();
        assert!(!session.move_to_coordinate(1.7).is_empty());
        assert_eq!(session.current_row(), Some(2));
        assert!(session.move_to_coordinate(-3.0).is_empty());
        assert_eq!(session.current_row(), Some(2));
    }

    #[test]
    fn test_queue_survives_map_load() {
        let mut session = SpectralSession::default();
        session.load_map(&FixedLoader, Path::new("three.txt")).unwrap();
        session.add_all();
        session.load_map(&FixedLoader, Path::new("two.txt")).unwrap();
        assert_eq!(session.queue().rows(), &[0, 1, 2]);
        assert_eq!(session.delete_queued(&[2], |_: &str| true), 1);
        assert_eq!(session.queue().rows(), &[0, 1]);
    }

    #[test]
    fn test_colormap_change_redraws_map() {
        let mut session = SpectralSession::default();
        assert!(session.set_colormap(Colormap::Jet).is_empty());
        session.load_map(&FixedLoader, Path::new("three.txt")).unwrap();
        let commands = session.set_colormap(Colormap::Gray);
        assert!(matches!(
            commands[0],
            RenderCommand::Map {
                colormap: Colormap::Gray,
                ..
            }
        ));
    }
}
