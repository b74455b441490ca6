//! Event dispatch.
//!
//! The UI shell turns raw input into [`Event`]s; [`Controller::handle`]
//! applies each one to the session and returns the render commands to run.
//! Keeping the shell out of the transitions makes them testable headless.

use std::path::PathBuf;

use log::debug;

use crate::calibration::{CalibrationEngine, CalibrationOrchestrator};
use crate::config::SessionConfig;
use crate::cursor::Direction;
use crate::display::{ColorRange, Colormap};
use crate::drop::{DropGeometry, DropTarget};
use crate::error::Result;
use crate::export::ExportSummary;
use crate::loader::DataLoader;
use crate::render::RenderCommand;
use crate::session::SpectralSession;

/// Keys with a meaning on the plot canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Redraw the 2D map with the current display settings.
    Enter,
}

/// A discrete user/UI event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A file dropped at absolute y `drop_y` on a window whose top edge is `window_top`.
    Drop {
        path: PathBuf,
        drop_y: f64,
        window_top: f64,
    },
    /// Load a map explicitly (file dialog, command line).
    LoadMap(PathBuf),
    /// Load a reference explicitly.
    LoadReference(PathBuf),
    /// Click on the 2D map at data-space y.
    PlotClick { y: f64 },
    /// Key press on the plot canvas.
    Key(Key),
    /// Queue the current row.
    AddCurrent,
    /// Queue every row.
    AddAll,
    /// Remove queue positions; `confirmed` is the user's answer to the prompt.
    DeleteQueued { positions: Vec<usize>, confirmed: bool },
    /// Run a calibration with the current parameter choices.
    Calibrate,
    /// Set the color range and redraw the map.
    ApplyColorRange(ColorRange),
    /// Choose a color map.
    SetColormap(Colormap),
    /// Toggle 1D autoscaling.
    SetAutoscale(bool),
    /// Export the queue; `None` when the folder dialog was cancelled.
    Export { destination: Option<PathBuf> },
}

/// Session plus its collaborators.
pub struct Controller<L, E> {
    session: SpectralSession,
    loader: L,
    engine: E,
    drop_geometry: DropGeometry,
}

impl<L: DataLoader, E: CalibrationEngine> Controller<L, E> {
    /// Create a controller with a fresh session.
    pub fn new(config: &SessionConfig, loader: L, engine: E) -> Self {
        let mut session = SpectralSession::new(config);
        session.draft_mut().fill_defaults(&engine);
        Self {
            session,
            loader,
            engine,
            drop_geometry: config.drop,
        }
    }

    /// Apply one event.
    ///
    /// # Errors
    /// Load, calibration and export failures are returned as-is; the
    /// session is unchanged in every failure case.
    pub fn handle(&mut self, event: Event) -> Result<Vec<RenderCommand>> {
        debug!("event: {event:?}");
        match event {
            Event::Drop {
                path,
                drop_y,
                window_top,
            } => match self.drop_geometry.classify(drop_y, window_top) {
                DropTarget::MapData => self.session.load_map(&self.loader, &path),
                DropTarget::Reference => {
                    self.session
                        .load_reference(&self.loader, &path, self.engine.materials())
                }
            },
            Event::LoadMap(path) => self.session.load_map(&self.loader, &path),
            Event::LoadReference(path) => {
                self.session
                    .load_reference(&self.loader, &path, self.engine.materials())
            }
            Event::PlotClick { y } => Ok(self.session.move_to_coordinate(y)),
            Event::Key(Key::Up) => Ok(self.session.step(Direction::Up)),
            Event::Key(Key::Down) => Ok(self.session.step(Direction::Down)),
            Event::Key(Key::Enter) => Ok(self.session.draw_map()),
            Event::AddCurrent => {
                self.session.add_current();
                Ok(Vec::new())
            }
            Event::AddAll => {
                self.session.add_all();
                Ok(Vec::new())
            }
            Event::DeleteQueued {
                positions,
                confirmed,
            } => {
                self.session
                    .delete_queued(&positions, |_: &str| confirmed);
                Ok(Vec::new())
            }
            Event::Calibrate => self.calibrate(),
            Event::ApplyColorRange(range) => {
                self.session.set_color_range(range);
                Ok(self.session.draw_map())
            }
            Event::SetColormap(colormap) => Ok(self.session.set_colormap(colormap)),
            Event::SetAutoscale(autoscale) => {
                self.session.set_autoscale(autoscale);
                Ok(Vec::new())
            }
            Event::Export { destination } => {
                self.export(destination.as_deref())?;
                Ok(Vec::new())
            }
        }
    }

    /// Calibrate with the session's current parameter choices.
    ///
    /// # Errors
    /// Returns [`Error::Calibration`](crate::Error::Calibration) on any
    /// precondition or fit failure.
    pub fn calibrate(&mut self) -> Result<Vec<RenderCommand>> {
        let params = self.session.draft().to_parameters()?;
        let commands =
            CalibrationOrchestrator::new(&mut self.engine).run(&params, &mut self.session)?;
        Ok(commands)
    }

    /// Export the queue to `destination`.
    ///
    /// # Errors
    /// See [`SpectralSession::export`].
    pub fn export(&self, destination: Option<&std::path::Path>) -> Result<ExportSummary> {
        self.session.export(destination)
    }

    /// Session state.
    #[must_use]
    pub fn session(&self) -> &SpectralSession {
        &self.session
    }

    /// Mutable session state (parameter widgets bind here).
    pub fn session_mut(&mut self) -> &mut SpectralSession {
        &mut self.session
    }

    /// Calibration engine (advertised parameter sets).
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Drop geometry in use.
    #[must_use]
    pub fn drop_geometry(&self) -> DropGeometry {
        self.drop_geometry
    }

    /// Replace the drop geometry, e.g. after a window resize.
    pub fn set_drop_geometry(&mut self, geometry: DropGeometry) {
        self.drop_geometry = geometry;
    }
}
