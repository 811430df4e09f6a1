//! Vector and rotation helpers shared by the chain and the solver.
//!
//! The 3-vector arithmetic itself comes from `nalgebra`; this module only adds
//! the few operations whose degenerate-case policy matters for kinematics.

use nalgebra::{Matrix3, Vector3};

/// World/local 3-vector used throughout the crate.
pub type Vec3 = Vector3<f64>;

/// 3x3 rotation matrix. Stored column-major; `Mat3::new` takes entries in
/// row order.
pub type Mat3 = Matrix3<f64>;

/// Normalize `v`, mapping zero or near-zero vectors to the zero vector.
///
/// A zero axis is a legal joint configuration: it simply contributes nothing
/// to the Jacobian, so this never fails.
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let len = v.norm();
    if len <= f64::EPSILON {
        return Vec3::zeros();
    }
    v / len
}

/// Rotation matrix for a rotation of `theta` radians about `axis` (Rodrigues).
///
/// The axis is normalized first. A zero axis yields the identity.
pub fn rotation_about_axis(axis: &Vec3, theta: f64) -> Mat3 {
    let n = normalize_or_zero(axis);
    if n == Vec3::zeros() {
        return Mat3::identity();
    }

    let (s, c) = theta.sin_cos();
    let t = 1.0 - c;

    Mat3::new(
        t * n.x * n.x + c,
        t * n.x * n.y - s * n.z,
        t * n.x * n.z + s * n.y,
        t * n.x * n.y + s * n.z,
        t * n.y * n.y + c,
        t * n.y * n.z - s * n.x,
        t * n.x * n.z - s * n.y,
        t * n.y * n.z + s * n.x,
        t * n.z * n.z + c,
    )
}

/// Serde adapter writing a [`Vec3`] as `{ "x": .., "y": .., "z": .. }`.
///
/// This is the shape embedding layers exchange points in; nalgebra's own
/// serde support would use a bare array instead.
pub mod xyz {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Vec3;

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        z: f64,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz { x: v.x, y: v.y, z: v.z }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let p = Xyz::deserialize(deserializer)?;
        Ok(Vec3::new(p.x, p.y, p.z))
    }

    /// Same as the parent adapter, for `Option<Vec3>` fields.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        use super::{Vec3, Xyz};

        pub fn serialize<S: Serializer>(v: &Option<Vec3>, serializer: S) -> Result<S::Ok, S::Error> {
            v.map(|v| Xyz { x: v.x, y: v.y, z: v.z }).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec3>, D::Error> {
            let p = Option::<Xyz>::deserialize(deserializer)?;
            Ok(p.map(|p| Vec3::new(p.x, p.y, p.z)))
        }
    }
}
