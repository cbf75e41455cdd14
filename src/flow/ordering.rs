//! Level-partitioned traversal order for the flow forest.
//!
//! Cells must be visited so that a cell is processed before all of its
//! donors (for erosion) or after them (for accumulation). A breadth-first
//! walk of the donor graph from the sinks produces such an order, and its
//! BFS depths partition the stack into *levels*: cells in the same level
//! are neither ancestors nor descendants of one another, so a level can be
//! processed in parallel once the previous level is finished.

use crate::grid::{Grid, NEIGHBOR_COUNT, SINK};

/// Topological order of the flow forest, from sinks toward headwaters.
///
/// `stack` holds every cell inside the halo exactly once; `levels` holds
/// the prefix boundaries, so level `k` is `stack[levels[k]..levels[k + 1]]`
/// and the last boundary equals the stack length.
#[derive(Debug, Default)]
pub struct FlowOrder {
    stack: Vec<u32>,
    levels: Vec<usize>,
}

impl FlowOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the buffers for a grid so steps after the first reuse the
    /// same allocations.
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            stack: Vec::with_capacity(cells),
            levels: Vec::with_capacity(64),
        }
    }

    /// Rebuilds the order from the current receiver/donor arrays.
    ///
    /// Level 0 is the seed set: every cell inside the halo whose receiver
    /// is `SINK`. Each later level is the concatenation of the previous
    /// level's donor lists. The walk terminates because receiver edges are
    /// strictly downhill, so the donor graph is a forest.
    pub fn build(&mut self, grid: &Grid, rec: &[u8], ndon: &[u8], donors: &[u32]) {
        self.stack.clear();
        self.levels.clear();
        self.levels.push(0);

        let width = grid.width();
        for y in 1..grid.height() - 1 {
            for x in 1..width - 1 {
                let c = y * width + x;
                if rec[c] == SINK {
                    self.stack.push(c as u32);
                }
            }
        }
        if self.stack.is_empty() {
            return;
        }
        self.levels.push(self.stack.len());

        let mut bottom = 0;
        let mut top = self.stack.len();
        while bottom < top {
            for si in bottom..top {
                let c = self.stack[si] as usize;
                let base = NEIGHBOR_COUNT * c;
                for k in 0..ndon[c] as usize {
                    self.stack.push(donors[base + k]);
                }
            }
            bottom = top;
            top = self.stack.len();
            if top > bottom {
                self.levels.push(top);
            }
        }

        debug_assert_eq!(*self.levels.last().unwrap(), self.stack.len());
        debug_assert_eq!(
            self.stack.len(),
            grid.frame_cell_count(),
            "flow forest must reach every cell inside the halo"
        );
    }

    /// Number of levels in the current order.
    pub fn num_levels(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// The cells of level `k`, in insertion order.
    pub fn level(&self, k: usize) -> &[u32] {
        &self.stack[self.levels[k]..self.levels[k + 1]]
    }

    /// The full traversal order, sinks first.
    pub fn stack(&self) -> &[u32] {
        &self.stack
    }

    /// The level boundaries into [`FlowOrder::stack`].
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }
}
