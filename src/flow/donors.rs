//! Donor enumeration by inverting the receiver array.
//!
//! The donors of a cell are the neighbours that drain into it. The natural
//! construction has every cell push itself onto its receiver's list, but
//! that gives several writers per list. Inverting the scan, so that each
//! cell examines its neighbours and records the ones that point back at
//! it, gives every cell sole write access to its own slots.

use rayon::prelude::*;

use crate::grid::{Grid, NEIGHBOR_COUNT, SINK};

/// Fills `ndon` and `donors` for every cell inside the halo.
///
/// `donors` holds [`NEIGHBOR_COUNT`] slots per cell; only the first
/// `ndon[c]` entries of `donors[8c..]` are meaningful.
pub fn compute_donors(grid: &Grid, rec: &[u8], ndon: &mut [u8], donors: &mut [u32]) {
    debug_assert_eq!(rec.len(), grid.cell_count());
    debug_assert_eq!(ndon.len(), grid.cell_count());
    debug_assert_eq!(donors.len(), NEIGHBOR_COUNT * grid.cell_count());

    let width = grid.width();
    let shifts = grid.shifts();

    ndon.par_chunks_exact_mut(width)
        .zip(donors.par_chunks_exact_mut(NEIGHBOR_COUNT * width))
        .enumerate()
        .skip(1)
        .take(grid.height() - 2)
        .for_each(|(y, (ndon_row, donor_row))| {
            for x in 1..width - 1 {
                let c = y * width + x;
                let mut count = 0usize;
                for &shift in &shifts {
                    let n = (c as isize + shift) as usize;
                    let d = rec[n];
                    if d != SINK && (n as isize + shifts[d as usize]) as usize == c {
                        donor_row[NEIGHBOR_COUNT * x + count] = n as u32;
                        count += 1;
                    }
                }
                ndon_row[x] = count as u8;
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::compute_receivers;
    use crate::terrain;

    fn flow_arrays(grid: &Grid, h: &[f64]) -> (Vec<u8>, Vec<u8>, Vec<u32>) {
        let mut rec = vec![SINK; grid.cell_count()];
        let mut ndon = vec![0u8; grid.cell_count()];
        let mut donors = vec![0u32; NEIGHBOR_COUNT * grid.cell_count()];
        compute_receivers(grid, h, &mut rec);
        compute_donors(grid, &rec, &mut ndon, &mut donors);
        (rec, ndon, donors)
    }

    #[test]
    fn donors_and_receivers_are_dual() {
        let grid = Grid::square(24);
        let mut h = vec![0.0; grid.cell_count()];
        terrain::fill_random(&grid, 99, &mut h);

        let (rec, ndon, donors) = flow_arrays(&grid, &h);
        let shifts = grid.shifts();

        // Every listed donor points back at the cell that lists it.
        for c in 0..grid.cell_count() {
            for k in 0..ndon[c] as usize {
                let n = donors[NEIGHBOR_COUNT * c + k] as usize;
                let d = rec[n];
                assert_ne!(d, SINK);
                assert_eq!((n as isize + shifts[d as usize]) as usize, c);
            }
        }

        // Every cell with a receiver appears in that receiver's list once.
        for n in 0..grid.cell_count() {
            let d = rec[n];
            if d == SINK {
                continue;
            }
            let c = (n as isize + shifts[d as usize]) as usize;
            let listed = (0..ndon[c] as usize)
                .filter(|&k| donors[NEIGHBOR_COUNT * c + k] as usize == n)
                .count();
            assert_eq!(listed, 1, "cell {n} should donate to {c} exactly once");
        }
    }

    #[test]
    fn donor_counts_stay_within_bounds() {
        let grid = Grid::square(16);
        let mut h = vec![0.0; grid.cell_count()];
        terrain::fill_random(&grid, 3, &mut h);

        let (_, ndon, _) = flow_arrays(&grid, &h);
        assert!(ndon.iter().all(|&n| n as usize <= NEIGHBOR_COUNT));
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let grid = Grid::square(18);
        let mut h = vec![0.0; grid.cell_count()];
        terrain::fill_random(&grid, 1234, &mut h);

        let (mut rec, mut ndon, mut donors) = flow_arrays(&grid, &h);
        let (rec0, ndon0, donors0) = (rec.clone(), ndon.clone(), donors.clone());

        compute_receivers(&grid, &h, &mut rec);
        compute_donors(&grid, &rec, &mut ndon, &mut donors);

        assert_eq!(rec, rec0);
        assert_eq!(ndon, ndon0);
        assert_eq!(donors, donors0);
    }

    #[test]
    fn pit_collects_all_neighbours() {
        let grid = Grid::square(9);
        let mut h = vec![1.0; grid.cell_count()];
        h[grid.index(4, 4)] = 0.0;

        let (_, ndon, donors) = flow_arrays(&grid, &h);
        let pit = grid.index(4, 4);
        assert_eq!(ndon[pit], 8);
        let mut listed: Vec<u32> = donors[8 * pit..8 * pit + 8].to_vec();
        listed.sort_unstable();
        let shifts = grid.shifts();
        let mut expected: Vec<u32> = shifts
            .iter()
            .map(|&s| (pit as isize + s) as u32)
            .collect();
        expected.sort_unstable();
        assert_eq!(listed, expected);
    }
}
