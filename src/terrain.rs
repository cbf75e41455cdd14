//! Seeded random initial terrain.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;

/// Fills `h` with uniform noise in `[0, 1)`.
///
/// Draws are made in row-major cell order so the field is reproducible
/// from the seed alone; the two boundary rings are then forced to 0, halo
/// and collar alike, regardless of what was drawn there.
pub fn fill_random(grid: &Grid, seed: u64, h: &mut [f64]) {
    debug_assert_eq!(h.len(), grid.cell_count());

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for v in h.iter_mut() {
        *v = rng.random();
    }

    let (width, height) = (grid.width(), grid.height());
    for y in 0..height {
        for x in 0..width {
            if x < 2 || y < 2 || x >= width - 2 || y >= height - 2 {
                h[grid.index(x, y)] = 0.0;
            }
        }
    }
}
