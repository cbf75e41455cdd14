//! The 8-cell neighbourhood of a grid cell.
//!
//! Directions are numbered so that `d ^ 4` is the opposite of `d`:
//!
//! ```text
//! 1 2 3
//! 0 . 4
//! 7 6 5
//! ```

/// Number of neighbours of a non-edge cell.
pub const NEIGHBOR_COUNT: usize = 8;

/// Receiver marker for a cell with no downhill neighbour.
pub const SINK: u8 = u8::MAX;

/// Distance to each neighbour in cell units: 1 for axial moves, √2 for
/// diagonal moves. Indexed by direction.
pub const STEP_LENGTHS: [f64; NEIGHBOR_COUNT] = [
    1.0,
    std::f64::consts::SQRT_2,
    1.0,
    std::f64::consts::SQRT_2,
    1.0,
    std::f64::consts::SQRT_2,
    1.0,
    std::f64::consts::SQRT_2,
];

/// Flat-index offsets to the eight neighbours of a cell, for a row-major
/// grid of the given width.
pub fn neighbor_shifts(width: usize) -> [isize; NEIGHBOR_COUNT] {
    let w = width as isize;
    [-1, -w - 1, -w, -w + 1, 1, w + 1, w, w - 1]
}

/// The direction pointing back at the focal cell.
pub fn opposite(direction: u8) -> u8 {
    debug_assert!((direction as usize) < NEIGHBOR_COUNT);
    direction ^ 4
}
