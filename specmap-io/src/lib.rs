//! specmap-io: file loading for specmap.
//!
//! Spectral maps and reference spectra are read from delimited text: one
//! spectrum per line, values separated by commas, semicolons, tabs or
//! spaces. `#` comment lines and blank lines are skipped.
//!

mod reader;

pub use reader::{parse_rows, TextLoader};
