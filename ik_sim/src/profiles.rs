//! Preset chains used by the parity sweep.
//!
//! Each profile is a chain of rotation joints with links along local Z and a
//! region that random targets are drawn from. The two presets match the
//! profiles other implementations of the solver are compared on.

use chain_ik::{Chain, JointSpec, Vec3};

use crate::sweep::ParkMiller;

/// Cylindrical shell around the Z axis that targets are sampled in.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRegion {
    pub min_radius: f64,
    pub radius_span: f64,
    pub min_z: f64,
    /// When zero, every target sits at `min_z` and no draw is spent on height.
    pub z_span: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainProfile {
    pub name: String,
    /// Local joint axes, base to tip.
    pub axes: Vec<[f64; 3]>,
    /// Link length preceding each joint.
    pub lengths: Vec<f64>,
    /// Symmetric joint limit in radians.
    pub limit: f64,
    pub region: TargetRegion,
}

impl ChainProfile {
    /// Two Z-axis joints, unit links.
    pub fn planar_zz() -> Self {
        Self {
            name: "planar-zz".to_string(),
            axes: vec![[0.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
            lengths: vec![1.0, 1.0],
            limit: std::f64::consts::PI,
            region: TargetRegion {
                min_radius: 0.0,
                radius_span: 1.6,
                min_z: 2.0,
                z_span: 0.0,
            },
        }
    }

    /// Y, Z and X joints with shrinking links.
    pub fn spatial_yzx() -> Self {
        Self {
            name: "spatial-yz".to_string(),
            axes: vec![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
            lengths: vec![0.8, 0.7, 0.5],
            limit: std::f64::consts::PI,
            region: TargetRegion {
                min_radius: 1.2,
                radius_span: 0.4,
                min_z: 0.6,
                z_span: 0.6,
            },
        }
    }

    pub fn presets() -> Vec<Self> {
        vec![Self::planar_zz(), Self::spatial_yzx()]
    }

    /// Build the chain at its zero pose, base at the origin.
    pub fn chain(&self) -> Chain {
        let joints = self
            .axes
            .iter()
            .zip(self.lengths.iter())
            .enumerate()
            .map(|(i, (axis, &length))| {
                JointSpec::rotation(Vec3::new(axis[0], axis[1], axis[2]), length)
                    .with_limits(-self.limit, self.limit)
                    .with_name(format!("joint-{}", i + 1))
            })
            .collect();
        Chain::new(joints, Vec3::zeros())
    }

    /// Draw a target: radius, then heading, then (if the region has height) z.
    pub fn sample_target(&self, rng: &mut ParkMiller) -> Vec3 {
        let region = &self.region;
        let r = region.min_radius + rng.next_f64() * region.radius_span;
        let theta = rng.next_f64() * std::f64::consts::TAU;
        let z = if region.z_span > 0.0 {
            region.min_z + rng.next_f64() * region.z_span
        } else {
            region.min_z
        };
        Vec3::new(theta.cos() * r, theta.sin() * r, z)
    }
}
