//! Implicit stream-power erosion.
//!
//! Each cell with a receiver is lowered according to
//! `dh/dt = -K * A^m * S^n`, integrated implicitly against the receiver's
//! elevation: the new elevation is the root of
//!
//! ```text
//! F(h) = h - h0 + K * dt * A^m * (h - hn)^n / L^n = 0
//! ```
//!
//! solved by Newton-Raphson from `h0`. Walking levels upward from the
//! sinks means every receiver is already finalised when its donors are
//! solved, which is exactly the semantics the implicit scheme needs.

use rayon::prelude::*;

use crate::flow::FlowOrder;
use crate::grid::{Grid, NEIGHBOR_COUNT, SINK, STEP_LENGTHS};
use crate::sim::ModelConfig;

/// Applies one erosion step to every cell with a receiver, level by level.
///
/// `scratch` must be at least as long as the largest level; new elevations
/// for a level are solved there in parallel, then scattered back into `h`.
pub fn erode(
    grid: &Grid,
    config: &ModelConfig,
    order: &FlowOrder,
    rec: &[u8],
    accum: &[f64],
    h: &mut [f64],
    scratch: &mut [f64],
) {
    let shifts = grid.shifts();
    let k_dt = config.erodibility * config.time_step;
    let m = config.area_exponent;
    let n = config.slope_exponent;
    let tol = config.tolerance;

    // Level 0 holds the sinks, which erosion never touches.
    for level in 1..order.num_levels() {
        let cells = order.level(level);
        let elevations: &[f64] = h;
        scratch[..cells.len()]
            .par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(out, &c)| {
                let c = c as usize;
                let dir = rec[c];
                debug_assert_ne!(dir, SINK, "only level 0 may hold sinks");
                debug_assert!((dir as usize) < NEIGHBOR_COUNT);

                let receiver = (c as isize + shifts[dir as usize]) as usize;
                let length = STEP_LENGTHS[dir as usize];
                let fact = k_dt * accum[c].powf(m) / length.powf(n);
                let h0 = elevations[c];
                let hn = elevations[receiver];

                let mut hnew = h0;
                let mut hprev = h0;
                let mut diff = 2.0 * tol;
                while diff.abs() > tol {
                    hnew -= (hnew - h0 + fact * (hnew - hn).powf(n))
                        / (1.0 + fact * n * (hnew - hn).powf(n - 1.0));
                    diff = hnew - hprev;
                    hprev = hnew;
                }
                *out = hnew;
            });
        for (i, &c) in cells.iter().enumerate() {
            h[c as usize] = scratch[i];
        }
    }
}
