//! Cumulative wall-clock timers.

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// A stopwatch that accumulates elapsed time across start/stop pairs.
#[derive(Debug, Default, Clone)]
pub struct CumulativeTimer {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl CumulativeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timer that is already running.
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    /// Starts the timer; a no-op if it is already running.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Stops the timer and folds the running interval into the total.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    /// Total accumulated time, including a still-running interval.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self.accumulated + started_at.elapsed(),
            None => self.accumulated,
        }
    }

    /// Total accumulated time in microseconds.
    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed().as_micros()
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started_at = None;
    }
}

/// Per-stage timers for a simulation run.
#[derive(Debug, Default)]
pub struct StepTimers {
    pub initialize: CumulativeTimer,
    pub receivers: CumulativeTimer,
    pub donors: CumulativeTimer,
    pub ordering: CumulativeTimer,
    pub accumulation: CumulativeTimer,
    pub uplift: CumulativeTimer,
    pub erosion: CumulativeTimer,
    pub overall: CumulativeTimer,
}

impl StepTimers {
    /// Writes one `t <label> = <microseconds> microseconds` line per stage.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let lines = [
            ("Step1: Initialize        ", &self.initialize),
            ("Step2: DetermineReceivers", &self.receivers),
            ("Step3: DetermineDonors   ", &self.donors),
            ("Step4: GenerateOrder     ", &self.ordering),
            ("Step5: FlowAcc           ", &self.accumulation),
            ("Step6: Uplift            ", &self.uplift),
            ("Step7: Erosion           ", &self.erosion),
            ("Overall                  ", &self.overall),
        ];
        for (label, timer) in lines {
            writeln!(out, "t {} = {:>15} microseconds", label, timer.elapsed_micros())?;
        }
        Ok(())
    }
}
