//! UI rendering modules.
//!
//! Contains the UI rendering logic split into separate modules:
//! - `control_panel`: Left sidebar (data, calibration, plot, export) and status bar
//! - `main_view`: Central panel with the 2D map and the 1D plot
//! - `theme`: Colors and styling

mod control_panel;
mod main_view;
pub mod theme;
