//! specmap-core: session, navigation, calibration and export state machine.
//!
//! This crate holds everything in specmap that carries state or edge-case
//! policy: drop routing, the navigation cursor, the export queue, the
//! calibration request/response cycle, and writing exported spectra. Data
//! loading and calibration fitting are abstracted behind the [`DataLoader`]
//! and [`CalibrationEngine`] traits; rendering is described by
//! [`RenderCommand`]s.
//!

pub mod calibration;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod display;
pub mod drop;
pub mod error;
pub mod export;
pub mod loader;
pub mod queue;
pub mod render;
pub mod session;
pub mod spectrum;

pub use calibration::{
    CalibrationDraft, CalibrationEngine, CalibrationInfo, CalibrationOrchestrator,
    CalibrationParameters, CalibrationStatus, FitDiagnostics, FitOutcome, FitRequest, FittedPeak,
};
pub use config::{CalibrationDefaults, SessionConfig, CENTER_PRESETS, DEFAULT_SEARCH_WIDTH};
pub use controller::{Controller, Event, Key};
pub use cursor::{Direction, NavigationCursor};
pub use display::{ColorRange, Colormap, DisplaySettings};
pub use drop::{DropGeometry, DropTarget, PlatformFamily};
pub use error::{CalibrationError, Error, FitFailure, LoadError, Result};
pub use export::{ExportHeader, ExportSummary, SpectrumFileWriter};
pub use loader::DataLoader;
pub use queue::{Confirm, SelectionQueue};
pub use render::{RenderCommand, SpectrumDraw};
pub use session::SpectralSession;
pub use spectrum::{AxisData, ReferenceSpectrum, SpectralMap};
