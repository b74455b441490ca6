//! Texture generation for the 2D map.

use egui::ColorImage;
use specmap_core::{ColorRange, Colormap, SpectralMap};

use crate::util::f64_to_f32;
use crate::viewer::ColormapExt;

/// Render a map as an image, one pixel per (row, channel).
///
/// Row 0 is the bottom image line so that image rows line up with the
/// row coordinate of the plot's y axis.
#[must_use]
pub fn generate_map_image(map: &SpectralMap, range: ColorRange, colormap: Colormap) -> ColorImage {
    let rows = map.row_count();
    let channels = map.channel_count();
    let data = map.as_array();
    let mut pixels = vec![0u8; rows * channels * 4];

    for (line, chunk) in pixels.chunks_exact_mut(channels.max(1) * 4).enumerate() {
        let row = rows - 1 - line;
        for (channel, px) in chunk.chunks_exact_mut(4).enumerate() {
            let value = data[[row, channel]];
            let rgba = if value.is_finite() {
                colormap.apply(f64_to_f32(range.normalize(value)))
            } else {
                [0, 0, 0, 255]
            };
            px.copy_from_slice(&rgba);
        }
    }

    ColorImage::from_rgba_unmultiplied([channels, rows], &pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_zero_at_bottom() {
        let map = SpectralMap::from_rows(vec![vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap();
        let range = ColorRange { min: 0.0, max: 10.0 };
        let img = generate_map_image(&map, range, Colormap::Gray);
        assert_eq!(img.size, [2, 2]);
        // top image line is row 1 (bright)
        assert_eq!(img.pixels[0], egui::Color32::WHITE);
        assert_eq!(img.pixels[2], egui::Color32::BLACK);
    }

    #[test]
    fn test_values_outside_range_clamp() {
        let map = SpectralMap::from_rows(vec![vec![-50.0, 5000.0]]).unwrap();
        let img = generate_map_image(&map, ColorRange::default(), Colormap::Gray);
        assert_eq!(img.pixels[0], egui::Color32::BLACK);
        assert_eq!(img.pixels[1], egui::Color32::WHITE);
    }
}
