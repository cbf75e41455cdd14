//! ESRI ASCII grid export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::grid::Grid;

/// Errors that can occur while writing a raster.
#[derive(Error, Debug)]
pub enum AsciiGridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("elevation buffer holds {0} cells but the grid has {1}")]
    SizeMismatch(usize, usize),
}

/// Writes the elevation field as an ESRI ASCII raster.
///
/// The outermost halo ring is omitted, so the emitted raster is
/// `(width - 2) x (height - 2)`; rows run top to bottom, values left to
/// right. The corner and cell-size header values are nominal.
pub fn write_ascii_grid(path: &Path, grid: &Grid, h: &[f64]) -> Result<(), AsciiGridError> {
    if h.len() != grid.cell_count() {
        return Err(AsciiGridError::SizeMismatch(h.len(), grid.cell_count()));
    }

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "ncols {}", grid.width() - 2)?;
    writeln!(out, "nrows {}", grid.height() - 2)?;
    writeln!(out, "xllcorner 637500.000")?;
    writeln!(out, "yllcorner 206000.000")?;
    writeln!(out, "cellsize 500.000")?;
    writeln!(out, "NODATA_value -9999")?;

    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            write!(out, "{} ", h[grid.index(x, y)])?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}
