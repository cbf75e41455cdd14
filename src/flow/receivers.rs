//! Steepest-descent receiver selection.
//!
//! The receiver of a cell is the neighbour that receives its flow: the one
//! reached by the steepest downhill gradient. A cell with no strictly
//! downhill neighbour is a sink.

use rayon::prelude::*;

use crate::grid::{Grid, SINK, STEP_LENGTHS};

/// Fills `rec` with the steepest-descent direction for every interior cell.
///
/// Boundary cells are never assigned: the halo and the collar keep whatever
/// `rec` already holds (`SINK` on a freshly initialised array), which makes
/// the collar the ring of sinks that drains the interior. The slope to a
/// neighbour must be strictly positive to count, so flat cells map to
/// `SINK`; among equally steep neighbours the lowest direction index wins.
pub fn compute_receivers(grid: &Grid, h: &[f64], rec: &mut [u8]) {
    debug_assert_eq!(h.len(), grid.cell_count());
    debug_assert_eq!(rec.len(), grid.cell_count());

    let width = grid.width();
    let shifts = grid.shifts();

    rec.par_chunks_exact_mut(width)
        .enumerate()
        .skip(2)
        .take(grid.height() - 4)
        .for_each(|(y, rec_row)| {
            for x in 2..width - 2 {
                let c = y * width + x;

                let mut max_slope = 0.0;
                let mut max_dir = SINK;
                for (d, &shift) in shifts.iter().enumerate() {
                    let n = (c as isize + shift) as usize;
                    let slope = (h[c] - h[n]) / STEP_LENGTHS[d];
                    if slope > max_slope {
                        max_slope = slope;
                        max_dir = d as u8;
                    }
                }
                rec_row[x] = max_dir;
            }
        });
}
