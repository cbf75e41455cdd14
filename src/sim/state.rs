//! Simulation state and the per-step pipeline.

use crate::flow::{accumulate, compute_donors, compute_receivers, FlowOrder};
use crate::grid::{Grid, NEIGHBOR_COUNT, SINK};
use crate::sim::{apply_uplift, erode, ModelConfig};
use crate::terrain;
use crate::timing::StepTimers;

/// A landscape evolution simulation over a regular grid.
///
/// Owns every working array; everything is allocated once here and reused
/// across steps. Each [`Simulation::step`] rebuilds the flow graph from
/// the current elevations and advances them by one time step:
///
/// 1. receivers - steepest-descent direction per cell
/// 2. donors - the receiver graph, inverted
/// 3. ordering - level-partitioned traversal from the sinks
/// 4. accumulation - drainage area along the flow forest
/// 5. uplift - constant lift of the interior
/// 6. erosion - implicit stream-power solve, sinks upward
pub struct Simulation {
    grid: Grid,
    config: ModelConfig,
    /// Elevation per cell; the only array that persists meaning across steps.
    h: Vec<f64>,
    /// Receiver direction per cell, or `SINK`.
    rec: Vec<u8>,
    /// Donor count per cell.
    ndon: Vec<u8>,
    /// Donor cell indices, `NEIGHBOR_COUNT` slots per cell.
    donors: Vec<u32>,
    /// Drainage area per cell.
    accum: Vec<f64>,
    order: FlowOrder,
    /// Per-level staging buffer for the pull-form parallel updates.
    scratch: Vec<f64>,
    timers: StepTimers,
}

impl Simulation {
    /// Creates a simulation with all elevations at zero.
    pub fn new(grid: Grid, config: ModelConfig) -> Self {
        let mut timers = StepTimers::default();
        timers.overall.start();
        timers.initialize.start();

        let cells = grid.cell_count();
        let h = vec![0.0; cells];
        let rec = vec![SINK; cells];
        let ndon = vec![0; cells];
        let donors = vec![0; NEIGHBOR_COUNT * cells];
        let accum = vec![0.0; cells];
        let order = FlowOrder::with_capacity(grid.frame_cell_count());
        let scratch = vec![0.0; cells];

        timers.initialize.stop();
        timers.overall.stop();

        Self {
            grid,
            config,
            h,
            rec,
            ndon,
            donors,
            accum,
            order,
            scratch,
            timers,
        }
    }

    /// Replaces the terrain with seeded uniform noise (boundary rings at 0).
    pub fn seed_random_terrain(&mut self, seed: u64) {
        self.timers.overall.start();
        self.timers.initialize.start();
        terrain::fill_random(&self.grid, seed, &mut self.h);
        self.timers.initialize.stop();
        self.timers.overall.stop();
    }

    /// Replaces the terrain with caller-provided elevations.
    pub fn set_elevations(&mut self, h: &[f64]) {
        assert_eq!(h.len(), self.grid.cell_count());
        self.h.copy_from_slice(h);
    }

    /// Advances the simulation by one time step.
    pub fn step(&mut self) {
        self.timers.overall.start();

        self.timers.receivers.start();
        compute_receivers(&self.grid, &self.h, &mut self.rec);
        self.timers.receivers.stop();

        self.timers.donors.start();
        compute_donors(&self.grid, &self.rec, &mut self.ndon, &mut self.donors);
        self.timers.donors.stop();

        self.timers.ordering.start();
        self.order.build(&self.grid, &self.rec, &self.ndon, &self.donors);
        self.timers.ordering.stop();

        self.timers.accumulation.start();
        accumulate(
            self.config.cell_area,
            &self.order,
            &self.ndon,
            &self.donors,
            &mut self.accum,
            &mut self.scratch,
        );
        self.timers.accumulation.stop();

        self.timers.uplift.start();
        apply_uplift(&self.grid, self.config.uplift_per_step(), &mut self.h);
        self.timers.uplift.stop();

        self.timers.erosion.start();
        erode(
            &self.grid,
            &self.config,
            &self.order,
            &self.rec,
            &self.accum,
            &mut self.h,
            &mut self.scratch,
        );
        self.timers.erosion.stop();

        self.timers.overall.stop();
    }

    /// Runs `steps` time steps, invoking `progress` before each one.
    pub fn run(&mut self, steps: usize, mut progress: impl FnMut(usize)) {
        for step in 0..steps {
            progress(step);
            self.step();
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Current elevation field.
    pub fn elevations(&self) -> &[f64] {
        &self.h
    }

    /// Receiver directions from the most recent step.
    pub fn receivers(&self) -> &[u8] {
        &self.rec
    }

    /// Drainage areas from the most recent step.
    pub fn drainage_area(&self) -> &[f64] {
        &self.accum
    }

    /// Traversal order from the most recent step.
    pub fn order(&self) -> &FlowOrder {
        &self.order
    }

    pub fn timers(&self) -> &StepTimers {
        &self.timers
    }
}
