//! Ordered open kinematic chain and its forward kinematics.
//!
//! A [`Chain`] is a base point plus joints in base-to-tip order. Evaluation
//! walks the joints once, carrying a running world rotation `R` (starting at
//! identity) and a running world position `P` (starting at the base):
//!
//! ```text
//! Rotation:     P += R * (0, 0, length);  record (P, axis_world);  R = R * Rot(axis_world, value)
//! Translation:  record (P, axis_world);   P += axis_world * value;  P += axis_world * length
//! ```

use crate::errors::ChainIkError;
use crate::joint::{JointMode, JointSpec, JointState};
use crate::math::{normalize_or_zero, rotation_about_axis, Mat3, Vec3};

/// An ordered kinematic chain from base to end effector.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    base: Vec3,
    joints: Vec<JointSpec>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(Vec::new(), Vec3::zeros())
    }
}

impl Chain {
    pub fn new(joints: Vec<JointSpec>, base: Vec3) -> Self {
        Self { base, joints }
    }

    pub fn set_base_position(&mut self, base: Vec3) {
        self.base = base;
    }

    pub fn base_position(&self) -> &Vec3 {
        &self.base
    }

    /// Replace every joint.
    pub fn set_joints(&mut self, joints: Vec<JointSpec>) {
        self.joints = joints;
    }

    pub fn joints(&self) -> &[JointSpec] {
        &self.joints
    }

    /// Mutable view of the joint list, used by the solver to write joint
    /// values in place.
    pub fn joints_mut(&mut self) -> &mut [JointSpec] {
        &mut self.joints
    }

    /// Number of joints (degrees of freedom).
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    pub fn joint_names(&self) -> Vec<&str> {
        self.joints.iter().map(|j| j.name.as_str()).collect()
    }

    pub fn joint_values(&self) -> Vec<f64> {
        self.joints.iter().map(|j| j.value).collect()
    }

    /// Per-joint pivot positions and world axes.
    pub fn joint_states(&self) -> Vec<JointState> {
        let mut states = Vec::with_capacity(self.joints.len());
        self.walk(|state, _| states.push(state));
        states
    }

    /// The base followed by the running position after each joint.
    ///
    /// Always `dof() + 1` entries; the first is the base and the last is the
    /// end effector.
    pub fn positions(&self) -> Vec<Vec3> {
        let mut positions = Vec::with_capacity(self.joints.len() + 1);
        positions.push(self.base);
        self.walk(|_, after| positions.push(after));
        positions
    }

    /// Tip of the chain, or the base when there are no joints.
    pub fn end_effector(&self) -> Vec3 {
        self.walk(|_, _| {})
    }

    /// Check every joint spec and the base point.
    pub fn validate(&self) -> Result<(), ChainIkError> {
        if !self.base.iter().all(|c| c.is_finite()) {
            return Err(ChainIkError::NonFinite {
                field: "base".to_string(),
                index: None,
            });
        }
        for (index, joint) in self.joints.iter().enumerate() {
            joint.validate(index)?;
        }
        Ok(())
    }

    /// Walk the joints base to tip.
    ///
    /// `visit` receives each joint's state and the running position once that
    /// joint has been applied. Returns the final position.
    fn walk(&self, mut visit: impl FnMut(JointState, Vec3)) -> Vec3 {
        let mut rot = Mat3::identity();
        let mut pos = self.base;

        for spec in &self.joints {
            let axis_world = normalize_or_zero(&(rot * spec.axis));

            let state = match spec.mode {
                JointMode::Rotation => {
                    pos += rot * Vec3::new(0.0, 0.0, spec.length);
                    let state = JointState { position: pos, axis_world, mode: spec.mode };
                    rot *= rotation_about_axis(&axis_world, spec.value);
                    state
                }
                JointMode::Translation => {
                    let state = JointState { position: pos, axis_world, mode: spec.mode };
                    pos += axis_world * spec.value;
                    pos += axis_world * spec.length;
                    state
                }
            };

            visit(state, pos);
        }

        pos
    }
}
