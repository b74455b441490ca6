//! Render state driven by session render commands.

use eframe::egui;
use specmap_core::{ColorRange, Colormap};

/// What the 1D panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotContent {
    #[default]
    Empty,
    /// A map row against the current axis.
    Spectrum(usize),
    /// The reference spectrum.
    Reference,
    /// Matched peaks and the fitted dispersion curve.
    FitResult,
}

/// How the 1D plot limits change on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBounds {
    /// Leave the plot's remembered limits alone.
    #[default]
    Keep,
    /// Forget the limits and fit them to what is drawn.
    Refit,
    /// Stop fitting and hold the current limits.
    Freeze,
}

impl LineBounds {
    /// Merge a newly requested update into a pending one. A pending
    /// refit is never downgraded.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        if self == Self::Refit {
            self
        } else {
            next
        }
    }
}

/// Retained drawing state for the 2D map and the 1D panel.
#[derive(Default)]
pub struct ViewState {
    pub plot: PlotContent,
    /// Pending change to the 1D plot limits, consumed by the next frame.
    pub line_bounds: LineBounds,
    /// Color range and colormap of the last map redraw.
    pub map_style: Option<(ColorRange, Colormap)>,
    /// Cached map texture, dropped whenever the map is redrawn.
    pub map_texture: Option<egui::TextureHandle>,
    pub marker: Option<usize>,
    /// Screen rect of the plotting area, used to route file drops.
    pub canvas: Option<egui::Rect>,
    /// Last pointer position seen while files hovered the window.
    pub drag_pos: Option<egui::Pos2>,
}
