//! Visualization modules for map display.

mod colormap;
mod texture;

pub use colormap::ColormapExt;
pub use texture::generate_map_image;
