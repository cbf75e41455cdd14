//! Drainage-area accumulation along the flow forest.
//!
//! Every cell starts with its own area; walking levels from the headwaters
//! down, each cell adds the totals of its donors. Summing over donors (the
//! pull form) rather than pushing into receivers keeps every write private
//! to one cell, so a level can be processed in parallel without atomics.

use rayon::prelude::*;

use crate::flow::FlowOrder;
use crate::grid::NEIGHBOR_COUNT;

/// Computes the drainage area of every cell: `cell_area` times the number
/// of cells whose flow passes through it, itself included.
///
/// `scratch` must be at least as long as the largest level; new values for
/// a level are computed there in parallel against the finalised totals of
/// the level above, then scattered back into `accum`.
pub fn accumulate(
    cell_area: f64,
    order: &FlowOrder,
    ndon: &[u8],
    donors: &[u32],
    accum: &mut [f64],
    scratch: &mut [f64],
) {
    accum.par_iter_mut().for_each(|a| *a = cell_area);

    let num_levels = order.num_levels();
    if num_levels < 2 {
        return;
    }

    // The top level has no donors; every level below pulls from the one
    // above it, down to and including the seeds so roots end up holding
    // their whole subtree.
    for k in (0..num_levels - 1).rev() {
        let cells = order.level(k);
        let totals: &[f64] = accum;
        scratch[..cells.len()]
            .par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(out, &c)| {
                let c = c as usize;
                let base = NEIGHBOR_COUNT * c;
                let mut area = totals[c];
                for i in 0..ndon[c] as usize {
                    area += totals[donors[base + i] as usize];
                }
                *out = area;
            });
        for (i, &c) in cells.iter().enumerate() {
            accum[c as usize] = scratch[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{compute_donors, compute_receivers};
    use crate::grid::{Grid, SINK};
    use crate::terrain;

    const CELL_AREA: f64 = 40_000.0;

    fn accumulated(grid: &Grid, h: &[f64]) -> (Vec<f64>, FlowOrder) {
        let mut rec = vec![SINK; grid.cell_count()];
        let mut ndon = vec![0u8; grid.cell_count()];
        let mut donors = vec![0u32; NEIGHBOR_COUNT * grid.cell_count()];
        compute_receivers(grid, h, &mut rec);
        compute_donors(grid, &rec, &mut ndon, &mut donors);
        let mut order = FlowOrder::new();
        order.build(grid, &rec, &ndon, &donors);

        let mut accum = vec![0.0; grid.cell_count()];
        let mut scratch = vec![0.0; grid.cell_count()];
        accumulate(CELL_AREA, &order, &ndon, &donors, &mut accum, &mut scratch);
        (accum, order)
    }

    #[test]
    fn flat_terrain_keeps_single_cell_areas() {
        let grid = Grid::square(7);
        let h = vec![0.0; grid.cell_count()];
        let (accum, _) = accumulated(&grid, &h);
        assert!(accum.iter().all(|&a| a == CELL_AREA));
    }

    #[test]
    fn ramp_accumulates_toward_the_low_edge() {
        let grid = Grid::square(10);
        let mut h = vec![0.0; grid.cell_count()];
        for y in 0..10 {
            for x in 0..10 {
                h[grid.index(x, y)] = x as f64;
            }
        }
        let (accum, _) = accumulated(&grid, &h);

        // Interior rows drain left cell by cell, so column x carries the
        // area of columns x..=7; the collar column receives the whole row.
        for y in 2..8 {
            for x in 2..8 {
                assert_eq!(accum[grid.index(x, y)], CELL_AREA * (8 - x) as f64);
            }
            assert_eq!(accum[grid.index(1, y)], CELL_AREA * 7.0);
        }
        // Collar rows above and below the interior drain nothing.
        for x in 1..9 {
            assert_eq!(accum[grid.index(x, 1)], CELL_AREA);
            assert_eq!(accum[grid.index(x, 8)], CELL_AREA);
        }
    }

    #[test]
    fn total_area_is_conserved_at_the_roots() {
        let grid = Grid::square(20);
        let mut h = vec![0.0; grid.cell_count()];
        terrain::fill_random(&grid, 42, &mut h);
        let (accum, order) = accumulated(&grid, &h);

        let root_total: f64 = order.level(0).iter().map(|&c| accum[c as usize]).sum();
        let expected = CELL_AREA * grid.frame_cell_count() as f64;
        assert!(
            (root_total - expected).abs() < 1e-6 * expected,
            "{root_total} != {expected}"
        );
    }

    #[test]
    fn accumulation_is_at_least_one_cell_everywhere() {
        let grid = Grid::square(15);
        let mut h = vec![0.0; grid.cell_count()];
        terrain::fill_random(&grid, 6, &mut h);
        let (accum, _) = accumulated(&grid, &h);
        assert!(accum.iter().all(|&a| a >= CELL_AREA));
    }
}
