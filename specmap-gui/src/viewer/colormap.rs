//! Colormap lookup tables and application logic.

use specmap_core::Colormap;

use crate::util::f32_to_u8;

type Rgb = [f32; 3];

const AUTUMN: &[Rgb] = &[[255.0, 0.0, 0.0], [255.0, 255.0, 0.0]];
const BINARY: &[Rgb] = &[[255.0, 255.0, 255.0], [0.0, 0.0, 0.0]];
const BONE: &[Rgb] = &[
    [0.0, 0.0, 0.0],
    [84.0, 84.0, 116.0],
    [169.0, 200.0, 200.0],
    [255.0, 255.0, 255.0],
];
const COOL: &[Rgb] = &[[0.0, 255.0, 255.0], [255.0, 0.0, 255.0]];
const COPPER: &[Rgb] = &[[0.0, 0.0, 0.0], [255.0, 199.0, 127.0]];
const GRAY: &[Rgb] = &[[0.0, 0.0, 0.0], [255.0, 255.0, 255.0]];
const HOT: &[Rgb] = &[
    [10.0, 0.0, 0.0],
    [230.0, 0.0, 0.0],
    [255.0, 210.0, 0.0],
    [255.0, 255.0, 255.0],
];
const INFERNO: &[Rgb] = &[
    [0.0, 0.0, 4.0],
    [87.0, 16.0, 110.0],
    [188.0, 55.0, 84.0],
    [249.0, 142.0, 9.0],
    [252.0, 255.0, 164.0],
];
const JET: &[Rgb] = &[
    [0.0, 0.0, 128.0],
    [0.0, 0.0, 255.0],
    [0.0, 255.0, 255.0],
    [255.0, 255.0, 0.0],
    [255.0, 0.0, 0.0],
    [128.0, 0.0, 0.0],
];
const MAGMA: &[Rgb] = &[
    [0.0, 0.0, 4.0],
    [81.0, 18.0, 124.0],
    [183.0, 55.0, 121.0],
    [252.0, 137.0, 97.0],
    [252.0, 253.0, 191.0],
];
const PLASMA: &[Rgb] = &[
    [13.0, 8.0, 135.0],
    [126.0, 3.0, 168.0],
    [204.0, 71.0, 120.0],
    [248.0, 149.0, 64.0],
    [240.0, 249.0, 33.0],
];
const SPRING: &[Rgb] = &[[255.0, 0.0, 255.0], [255.0, 255.0, 0.0]];
const SUMMER: &[Rgb] = &[[0.0, 128.0, 102.0], [255.0, 255.0, 102.0]];
const VIRIDIS: &[Rgb] = &[
    [68.0, 1.0, 84.0],
    [59.0, 82.0, 139.0],
    [33.0, 145.0, 140.0],
    [94.0, 201.0, 98.0],
    [253.0, 231.0, 37.0],
];
const WINTER: &[Rgb] = &[[0.0, 0.0, 255.0], [0.0, 255.0, 128.0]];

/// RGBA lookup for the session's [`Colormap`] choices.
pub trait ColormapExt {
    /// Apply the colormap to a normalized value [0, 1] and return RGBA bytes.
    fn apply(self, val: f32) -> [u8; 4];
}

impl ColormapExt for Colormap {
    fn apply(self, val: f32) -> [u8; 4] {
        let [r, g, b] = interpolate(stops(self), val);
        [f32_to_u8(r), f32_to_u8(g), f32_to_u8(b), 255]
    }
}

fn stops(colormap: Colormap) -> &'static [Rgb] {
    match colormap {
        Colormap::Autumn => AUTUMN,
        Colormap::Binary => BINARY,
        Colormap::Bone => BONE,
        Colormap::Cool => COOL,
        Colormap::Copper => COPPER,
        Colormap::Gray => GRAY,
        Colormap::Hot => HOT,
        Colormap::Inferno => INFERNO,
        Colormap::Jet => JET,
        Colormap::Magma => MAGMA,
        Colormap::Plasma => PLASMA,
        Colormap::Spring => SPRING,
        Colormap::Summer => SUMMER,
        Colormap::Viridis => VIRIDIS,
        Colormap::Winter => WINTER,
    }
}

/// Piecewise-linear interpolation between evenly spaced stops.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn interpolate(stops: &[Rgb], val: f32) -> Rgb {
    let val = if val.is_nan() { 0.0 } else { val.clamp(0.0, 1.0) };
    let segments = stops.len().saturating_sub(1);
    if segments == 0 {
        return stops.first().copied().unwrap_or([0.0; 3]);
    }
    let pos = val * segments as f32;
    let i = (pos.floor() as usize).min(segments - 1);
    let t = pos - i as f32;
    let (a, b) = (stops[i], stops[i + 1]);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
