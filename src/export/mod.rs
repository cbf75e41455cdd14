//! Raster export.

mod ascii_grid;

pub use ascii_grid::{write_ascii_grid, AsciiGridError};
