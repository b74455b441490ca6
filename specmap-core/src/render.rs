//! Commands for the plot renderer and the 1D line redraw policy.

use crate::display::{ColorRange, Colormap};

/// How the 1D spectrum panel should be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumDraw {
    /// Clear the panel and draw the line; axis limits re-fit.
    FullRedraw,
    /// Remove the previously drawn line and draw the new one; limits stay.
    ReplaceLine,
}

/// Instructions emitted by session transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Draw `AxisData` against row `row` of the map on the 1D panel.
    Spectrum { row: usize, draw: SpectrumDraw },
    /// Clear the 1D panel and draw the reference spectrum.
    Reference,
    /// Clear the 1D panel and draw the last fit diagnostics.
    FitResult,
    /// Redraw the 2D map image (and its axis labels).
    Map {
        range: ColorRange,
        colormap: Colormap,
        marker: Option<usize>,
    },
    /// Move the row marker on the 2D map.
    RowMarker(usize),
}

/// Tracks the spectrum line currently drawn on the 1D panel.
///
/// Invalidated whenever the panel is cleared by something other than a row
/// change (map load, reference load, calibration).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCache {
    drawn: Option<usize>,
}

impl LineCache {
    /// Forget the drawn line.
    pub fn invalidate(&mut self) {
        self.drawn = None;
    }

    /// Row of the line currently drawn, if any.
    #[must_use]
    pub fn drawn(&self) -> Option<usize> {
        self.drawn
    }

    /// Decide how to draw `row` and record it as drawn.
    pub fn plan(&mut self, row: usize, autoscale: bool) -> SpectrumDraw {
        let draw = if autoscale || self.drawn.is_none() {
            SpectrumDraw::FullRedraw
        } else {
            SpectrumDraw::ReplaceLine
        };
        self.drawn = Some(row);
        draw
    }
}
