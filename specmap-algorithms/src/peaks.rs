//! Peak search and sub-channel refinement.

use std::fmt;
use std::str::FromStr;

/// Peak-shape model used to refine a peak position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakShape {
    /// Vertex of a parabola through the reciprocal intensities.
    Lorentzian,
    /// Vertex of a parabola through the log intensities.
    Gaussian,
    /// Intensity-weighted centroid of the five samples around the maximum.
    Centroid,
}

impl PeakShape {
    /// Every shape in advertised order.
    pub const ALL: [PeakShape; 3] = [PeakShape::Lorentzian, PeakShape::Gaussian, PeakShape::Centroid];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PeakShape::Lorentzian => "Lorentzian",
            PeakShape::Gaussian => "Gaussian",
            PeakShape::Centroid => "Centroid",
        }
    }
}

impl fmt::Display for PeakShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PeakShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PeakShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| format!("unknown peak shape: {s}"))
    }
}

/// Search options for [`find_peak`].
#[derive(Debug, Clone, Copy)]
pub struct PeakSearch {
    /// Half-width of the search window, in channels.
    pub search_width: f64,
    /// Accept any local maximum inside the window.
    pub easy: bool,
    /// Strict mode only: required height above the window median, as a
    /// fraction of the spectrum's full intensity span.
    pub prominence: f64,
}

/// Locate the peak nearest `expected` channel and refine it to sub-channel
/// precision.
///
/// Returns `None` when the window has no acceptable maximum.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
pub fn find_peak(values: &[f64], expected: f64, search: &PeakSearch, shape: PeakShape) -> Option<f64> {
    let n = values.len();
    if n < 3 || !expected.is_finite() {
        return None;
    }
    let last = (n - 1) as f64;
    let lo = (expected - search.search_width).floor().clamp(0.0, last) as usize;
    let hi = (expected + search.search_width).ceil().clamp(0.0, last) as usize;
    if hi <= lo {
        return None;
    }

    let window = &values[lo..=hi];
    let (offset, &peak) = window
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    let index = lo + offset;

    // must be a true local maximum, not a slope running out of the window
    if index == 0 || index == n - 1 {
        return None;
    }
    if values[index - 1] > peak || values[index + 1] > peak {
        return None;
    }
    if values[index - 1] == peak && values[index + 1] == peak {
        return None;
    }

    if !search.easy {
        if index == lo || index == hi {
            return None;
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if peak - median(window) < search.prominence * (max - min) {
            return None;
        }
    }

    Some(index as f64 + refine(values, index, shape))
}

/// Sub-channel offset of the peak at `index`, clamped to `[-1, 1]`.
fn refine(values: &[f64], index: usize, shape: PeakShape) -> f64 {
    let (a, b, c) = (values[index - 1], values[index], values[index + 1]);
    let offset = match shape {
        PeakShape::Gaussian if a > 0.0 && b > 0.0 && c > 0.0 => {
            parabola_vertex(a.ln(), b.ln(), c.ln())
        }
        PeakShape::Lorentzian if a > 0.0 && b > 0.0 && c > 0.0 => {
            parabola_vertex(1.0 / a, 1.0 / b, 1.0 / c)
        }
        PeakShape::Gaussian | PeakShape::Lorentzian => parabola_vertex(a, b, c),
        PeakShape::Centroid => centroid(values, index),
    };
    if offset.is_finite() {
        offset.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Vertex offset of the parabola through `(-1, a)`, `(0, b)`, `(1, c)`.
fn parabola_vertex(a: f64, b: f64, c: f64) -> f64 {
    let denom = a - 2.0 * b + c;
    if denom.abs() < f64::EPSILON {
        return 0.0;
    }
    0.5 * (a - c) / denom
}

#[allow(clippy::cast_precision_loss)]
fn centroid(values: &[f64], index: usize) -> f64 {
    let lo = index.saturating_sub(2);
    let hi = (index + 2).min(values.len() - 1);
    let floor = values[lo..=hi].iter().copied().fold(f64::INFINITY, f64::min);
    let mut weight = 0.0;
    let mut moment = 0.0;
    for (i, &v) in values.iter().enumerate().take(hi + 1).skip(lo) {
        let w = v - floor;
        weight += w;
        moment += w * (i as f64 - index as f64);
    }
    if weight > 0.0 {
        moment / weight
    } else {
        0.0
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
