//! Seeded solve sweep over the preset chain profiles.
//!
//! Targets come from a Park-Miller generator so every run (and every other
//! implementation fed the same seed) sees the same sequence.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use chain_ik::{IkSolver, SolveOutcome, CHAIN_IK_TOLERANCE};

use crate::profiles::ChainProfile;

const LCG_MOD: u64 = 2_147_483_647;
const LCG_MULT: u64 = 16_807;
const LCG_NORM: f64 = 2_147_483_646.0;

/// Park-Miller "minimal standard" generator yielding values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    pub fn new(seed: u64) -> Self {
        // Zero is a fixed point of the recurrence
        let state = seed % LCG_MOD;
        Self { state: if state == 0 { 1 } else { state } }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULT) % LCG_MOD;
        (self.state - 1) as f64 / LCG_NORM
    }
}

impl Default for ParkMiller {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub samples_per_profile: usize,
    pub iterations: i32,
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            samples_per_profile: 12,
            iterations: 60,
            tolerance: CHAIN_IK_TOLERANCE,
            seed: 12345,
        }
    }
}

/// Aggregate results of a sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SweepSummary {
    pub samples: usize,
    pub converged: usize,
    pub stalled: usize,
    pub exhausted: usize,
    pub max_error: f64,
    pub mean_error: f64,
    pub mean_solve_micros: f64,
    /// Samples whose residual came back NaN or infinite.
    pub non_finite: usize,
}

impl SweepSummary {
    fn record(&mut self, error: f64, outcome: SolveOutcome, micros: f64) {
        self.samples += 1;
        match outcome {
            SolveOutcome::Converged => self.converged += 1,
            SolveOutcome::Stalled => self.stalled += 1,
            SolveOutcome::Exhausted => self.exhausted += 1,
            SolveOutcome::NoJoints | SolveOutcome::NonFinite => {}
        }
        if error.is_finite() {
            self.max_error = self.max_error.max(error);
            self.mean_error += error;
        } else {
            self.non_finite += 1;
        }
        self.mean_solve_micros += micros;
    }

    fn finish(&mut self) {
        let finite = self.samples - self.non_finite;
        if finite > 0 {
            self.mean_error /= finite as f64;
        }
        if self.samples > 0 {
            self.mean_solve_micros /= self.samples as f64;
        }
    }
}

/// Solve `config.samples_per_profile` random targets for each profile.
pub fn run_sweep(profiles: &[ChainProfile], config: &SweepConfig) -> SweepSummary {
    let mut rng = ParkMiller::new(config.seed);
    let mut summary = SweepSummary::default();

    for profile in profiles {
        for sample in 0..config.samples_per_profile {
            let target = profile.sample_target(&mut rng);

            let mut solver = IkSolver::new(profile.chain());
            solver.set_tolerance(config.tolerance);
            solver.set_target(target);

            let start = Instant::now();
            let report = solver.solve_report(config.iterations);
            let micros = start.elapsed().as_secs_f64() * 1e6;

            debug!(
                profile = %profile.name,
                sample,
                error = report.error,
                outcome = ?report.outcome,
                "sample solved"
            );
            summary.record(report.error, report.outcome, micros);
        }
    }

    summary.finish();
    info!(
        samples = summary.samples,
        profiles = profiles.len(),
        max_error = summary.max_error,
        "sweep complete"
    );
    summary
}
