//! Damped least-squares (Levenberg-Marquardt) position IK.
//!
//! Each iteration evaluates the chain, builds the 3xN position Jacobian,
//! solves the damped normal equations
//!
//! ```text
//! (JᵀJ + λ²I) δ = Jᵀ (target - end_effector)
//! ```
//!
//! and writes `clamp(value + step_scale * δ)` back into the chain's joints.
//! The damping keeps the system solvable when `J` loses rank, e.g. with the
//! chain fully stretched or with degenerate axes.

use nalgebra::{DMatrix, Matrix3xX};
use tracing::{debug, trace};

use crate::chain::Chain;
use crate::config::SolverConfig;
use crate::joint::{JointMode, JointState};
use crate::linalg::solve_linear;
use crate::math::Vec3;
use crate::{CHAIN_IK_TOLERANCE, DEFAULT_DAMPING, DEFAULT_ITERATIONS, DEFAULT_STEP_SCALE};

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The error dropped below the tolerance.
    Converged,
    /// The chain has no joints to move.
    NoJoints,
    /// The largest joint step fell below a tenth of the tolerance, usually
    /// because joint limits absorb the requested motion.
    Stalled,
    /// The iteration budget ran out.
    Exhausted,
    /// The error was NaN or infinite, e.g. from a non-finite target. Joint
    /// values are left as they were.
    NonFinite,
}

/// Result of [`IkSolver::solve_report`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Positional error between target and end effector.
    ///
    /// For [`SolveOutcome::Stalled`] this is the error measured at the start
    /// of the final iteration.
    pub error: f64,
    /// Joint updates applied.
    pub iterations: usize,
    pub outcome: SolveOutcome,
}

/// Iterative IK solver owning one chain and a target point.
///
/// The solver is the only writer of its chain's joint values during a solve.
#[derive(Debug, Clone)]
pub struct IkSolver {
    chain: Chain,
    target: Vec3,
    damping: f64,
    tolerance: f64,
    step_scale: f64,
}

impl Default for IkSolver {
    fn default() -> Self {
        Self::new(Chain::default())
    }
}

impl IkSolver {
    /// Create a solver targeting the chain's current end effector.
    pub fn new(chain: Chain) -> Self {
        let target = chain.end_effector();
        Self {
            chain,
            target,
            damping: DEFAULT_DAMPING,
            tolerance: CHAIN_IK_TOLERANCE,
            step_scale: DEFAULT_STEP_SCALE,
        }
    }

    /// Create a solver and apply `config` through the regular setters.
    pub fn with_config(chain: Chain, config: &SolverConfig) -> Self {
        let mut solver = Self::new(chain);
        solver.set_damping(config.damping);
        solver.set_tolerance(config.tolerance);
        solver.set_step_scale(config.step_scale);
        solver
    }

    /// Replace the chain and retarget to its current end effector.
    pub fn set_chain(&mut self, chain: Chain) {
        self.target = chain.end_effector();
        self.chain = chain;
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn into_chain(self) -> Chain {
        self.chain
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> &Vec3 {
        &self.target
    }

    /// Set lambda. Negative (and NaN) values become zero.
    pub fn set_damping(&mut self, lambda: f64) {
        self.damping = lambda.max(0.0);
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Set the convergence threshold. Negative (and NaN) values become zero.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance.max(0.0);
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_step_scale(&mut self, step_scale: f64) {
        self.step_scale = step_scale;
    }

    pub fn step_scale(&self) -> f64 {
        self.step_scale
    }

    /// Joint positions of the owned chain, base first, end effector last.
    pub fn positions(&self) -> Vec<Vec3> {
        self.chain.positions()
    }

    /// Distance from the current end effector to the target.
    pub fn error(&self) -> f64 {
        (self.target - self.chain.end_effector()).norm()
    }

    /// Run up to `iterations` damped Gauss-Newton steps and return the
    /// remaining positional error. Negative `iterations` means 20.
    ///
    /// A small return value is the only sign of success; unreachable targets
    /// just leave a residual.
    pub fn solve(&mut self, iterations: i32) -> f64 {
        self.solve_report(iterations).error
    }

    /// Like [`solve`](Self::solve), also reporting why the solve stopped.
    pub fn solve_report(&mut self, iterations: i32) -> SolveReport {
        let max_iterations = usize::try_from(iterations).unwrap_or(DEFAULT_ITERATIONS);

        for iteration in 0..max_iterations {
            let states = self.chain.joint_states();
            let end = self.chain.end_effector();
            let diff = self.target - end;
            let err = diff.norm();

            if !err.is_finite() {
                return self.finish(err, iteration, SolveOutcome::NonFinite);
            }
            if err < self.tolerance {
                return self.finish(err, iteration, SolveOutcome::Converged);
            }

            let n = states.len();
            if n == 0 {
                return self.finish(err, iteration, SolveOutcome::NoJoints);
            }

            let jacobian = position_jacobian(&states, &end);
            let mut normal = jacobian.tr_mul(&jacobian);
            normal += DMatrix::<f64>::identity(n, n) * (self.damping * self.damping);
            let rhs = jacobian.tr_mul(&diff);

            let delta = solve_linear(normal, rhs);

            let mut max_step: f64 = 0.0;
            for (spec, d) in self.chain.joints_mut().iter_mut().zip(delta.iter()) {
                let step = self.step_scale * d;
                spec.value = spec.clamp_value(spec.value + step);
                max_step = max_step.max(step.abs());
            }

            trace!(iteration, error = err, max_step, "ik iteration");

            if max_step < self.tolerance * 0.1 {
                return self.finish(err, iteration + 1, SolveOutcome::Stalled);
            }
        }

        let err = self.error();
        self.finish(err, max_iterations, SolveOutcome::Exhausted)
    }

    fn finish(&self, error: f64, iterations: usize, outcome: SolveOutcome) -> SolveReport {
        debug!(?outcome, iterations, error, dof = self.chain.dof(), "ik solve finished");
        SolveReport { error, iterations, outcome }
    }
}

/// Position Jacobian: one column per joint giving the end-effector velocity
/// per unit joint rate.
///
/// Rotation joints contribute `axis × (end - pivot)`, translation joints
/// their world axis.
pub fn position_jacobian(states: &[JointState], end: &Vec3) -> Matrix3xX<f64> {
    let mut jacobian = Matrix3xX::zeros(states.len());
    for (i, state) in states.iter().enumerate() {
        let column = match state.mode {
            JointMode::Rotation => state.axis_world.cross(&(end - state.position)),
            JointMode::Translation => state.axis_world,
        };
        jacobian.set_column(i, &column);
    }
    jacobian
}
