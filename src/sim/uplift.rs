//! Tectonic uplift.

use rayon::prelude::*;

use crate::grid::Grid;

/// Raises every interior cell by `amount`. The two boundary rings are a
/// fixed-height collar and are left alone; without uplift the landscape
/// would simply erode flat.
pub fn apply_uplift(grid: &Grid, amount: f64, h: &mut [f64]) {
    debug_assert_eq!(h.len(), grid.cell_count());

    let width = grid.width();
    h.par_chunks_exact_mut(width)
        .skip(2)
        .take(grid.height() - 4)
        .for_each(|row| {
            for v in &mut row[2..width - 2] {
                *v += amount;
            }
        });
}
