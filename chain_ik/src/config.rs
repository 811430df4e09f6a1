//! JSON-loadable solver parameters and chain documents.
//!
//! ```rust,ignore
//! let config = ChainConfig::load("arm.json")?;
//! let mut solver = config.into_solver();
//! let error = solver.solve(config.solver.iterations);
//! ```
//!
//! A chain document looks like:
//!
//! ```json
//! {
//!   "base": { "x": 0, "y": 0, "z": 0 },
//!   "joints": [
//!     { "axis": { "x": 0, "y": 0, "z": 1 }, "length": 1, "mode": "Rotation",
//!       "minLimit": -3.14159, "maxLimit": 3.14159, "value": 0, "name": "shoulder" }
//!   ],
//!   "target": { "x": 0.5, "y": 1.1, "z": 0 },
//!   "solver": { "damping": 0.001, "tolerance": 1e-6, "stepScale": 1.0, "iterations": 32 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chain::Chain;
use crate::errors::ChainIkError;
use crate::joint::JointSpec;
use crate::math::Vec3;
use crate::solver::IkSolver;
use crate::{CHAIN_IK_TOLERANCE, DEFAULT_DAMPING, DEFAULT_ITERATIONS, DEFAULT_STEP_SCALE};

/// Tunable parameters of an [`IkSolver`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    /// Levenberg-Marquardt damping (lambda). Clamped to `>= 0` when applied.
    pub damping: f64,
    /// Convergence threshold on the end-effector error. Clamped to `>= 0`.
    pub tolerance: f64,
    /// Multiplier on each update. Negative values invert the step.
    pub step_scale: f64,
    /// Iteration budget for a solve; negative means the default of 20.
    pub iterations: i32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            tolerance: CHAIN_IK_TOLERANCE,
            step_scale: DEFAULT_STEP_SCALE,
            iterations: DEFAULT_ITERATIONS as i32,
        }
    }
}

impl SolverConfig {
    /// Reject NaN parameters.
    ///
    /// Negative damping or tolerance is accepted (the solver floors them at
    /// zero) but logged.
    pub fn validate(&self) -> Result<(), ChainIkError> {
        if self.damping.is_nan() {
            return Err(ChainIkError::InvalidConfig("damping is NaN".to_string()));
        }
        if self.tolerance.is_nan() {
            return Err(ChainIkError::InvalidConfig("tolerance is NaN".to_string()));
        }
        if !self.step_scale.is_finite() {
            return Err(ChainIkError::InvalidConfig(format!(
                "stepScale must be finite, got {}",
                self.step_scale
            )));
        }

        if self.damping < 0.0 {
            warn!(damping = self.damping, "negative damping will be clamped to 0");
        }
        if self.tolerance < 0.0 {
            warn!(tolerance = self.tolerance, "negative tolerance will be clamped to 0");
        }
        Ok(())
    }
}

/// A chain plus solver settings, as stored in a JSON document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ChainConfig {
    #[serde(with = "crate::math::xyz")]
    pub base: Vec3,
    pub joints: Vec<JointSpec>,
    /// Goal point. When absent the solver targets the chain's current end
    /// effector, so a solve is a no-op.
    #[serde(with = "crate::math::xyz::option", skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec3>,
    pub solver: SolverConfig,
}

impl ChainConfig {
    /// Parse and validate a chain document.
    pub fn from_json_str(json: &str) -> Result<Self, ChainIkError> {
        let config: ChainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a chain document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChainIkError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ChainIkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ChainIkError> {
        self.chain().validate()?;
        if let Some(target) = &self.target {
            if !target.iter().all(|c| c.is_finite()) {
                return Err(ChainIkError::NonFinite {
                    field: "target".to_string(),
                    index: None,
                });
            }
        }
        self.solver.validate()
    }

    pub fn chain(&self) -> Chain {
        Chain::new(self.joints.clone(), self.base)
    }

    /// Build a solver for this chain with the configured parameters and target.
    pub fn into_solver(&self) -> IkSolver {
        let mut solver = IkSolver::with_config(self.chain(), &self.solver);
        if let Some(target) = self.target {
            solver.set_target(target);
        }
        solver
    }
}
