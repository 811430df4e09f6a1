//! Forward and inverse kinematics for open chains of single-DOF joints.
//!
//! A [`Chain`] is an ordered list of [`JointSpec`]s hanging off a base point.
//! [`IkSolver`] owns a chain and drives its end effector toward a target with
//! damped least squares, clamping joint values to their limits as it goes.
//!
//! ```text
//! JointSpec* ──► Chain ──► IkSolver::solve ──► joint values / positions
//! ```
//!
//! # Examples
//!
//! ```rust
//! use chain_ik::{Chain, IkSolver, JointSpec, Vec3};
//!
//! let arm = Chain::new(
//!     vec![
//!         JointSpec::rotation(Vec3::x(), 1.0),
//!         JointSpec::rotation(Vec3::x(), 1.0),
//!         JointSpec::rotation(Vec3::x(), 1.0).with_limits(0.0, 0.0),
//!     ],
//!     Vec3::zeros(),
//! );
//!
//! let mut solver = IkSolver::new(arm);
//! solver.set_target(Vec3::new(0.0, 1.0, 1.0));
//! let error = solver.solve(50);
//! assert!(error < 1e-3);
//! ```

pub mod chain;
pub mod config;
pub mod errors;
pub mod joint;
pub mod linalg;
pub mod math;
pub mod solver;

pub use chain::Chain;
pub use config::{ChainConfig, SolverConfig};
pub use errors::*;
pub use joint::{JointMode, JointSpec, JointState};
pub use math::{Mat3, Vec3};
pub use solver::{IkSolver, SolveOutcome, SolveReport};

/// Numeric tolerance shared with conformance tests run against other
/// implementations of the same solver.
pub const CHAIN_IK_TOLERANCE: f64 = 1e-6;

/// Iteration budget used when a solve is asked for a negative count.
pub const DEFAULT_ITERATIONS: usize = 20;

pub const DEFAULT_DAMPING: f64 = 1e-3;

pub const DEFAULT_STEP_SCALE: f64 = 1.0;
