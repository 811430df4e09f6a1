//! Joint specifications and their per-evaluation world state.

use int_enum::IntEnum;
use serde::{Deserialize, Serialize};

use crate::errors::ChainIkError;
use crate::math::Vec3;

/// How a joint's `value` moves the chain.
///
/// Serialized by name (`"Rotation"`/`"Translation"`). The `u8`
/// discriminants exist for `IntEnum` conversion only.
#[repr(u8)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, IntEnum)]
pub enum JointMode {
    /// `value` is an angle in radians about the joint axis.
    Rotation = 0,
    /// `value` is a distance along the joint axis.
    Translation = 1,
}

impl Default for JointMode {
    fn default() -> Self {
        Self::Rotation
    }
}

/// One degree of freedom in a [`Chain`](crate::Chain).
///
/// The solver keeps `min_limit <= value <= max_limit` after every update it
/// makes; the type itself does not enforce it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JointSpec {
    /// Axis in the joint's local frame. Need not be unit length.
    #[serde(with = "crate::math::xyz")]
    pub axis: Vec3,
    /// Link offset along the running local Z axis.
    pub length: f64,
    pub mode: JointMode,
    #[serde(serialize_with = "limit::serialize", deserialize_with = "limit::deserialize_min")]
    pub min_limit: f64,
    #[serde(serialize_with = "limit::serialize", deserialize_with = "limit::deserialize_max")]
    pub max_limit: f64,
    /// Radians for rotation joints, distance for translation joints.
    pub value: f64,
    /// Informational only.
    pub name: String,
}

impl Default for JointSpec {
    fn default() -> Self {
        Self {
            axis: Vec3::z(),
            length: 0.0,
            mode: JointMode::Rotation,
            min_limit: f64::NEG_INFINITY,
            max_limit: f64::INFINITY,
            value: 0.0,
            name: String::new(),
        }
    }
}

impl JointSpec {
    /// A rotation joint about `axis` whose link of `length` precedes it.
    pub fn rotation(axis: Vec3, length: f64) -> Self {
        Self {
            axis,
            length,
            mode: JointMode::Rotation,
            ..Self::default()
        }
    }

    /// A translation joint along `axis` followed by a fixed offset of `length`.
    pub fn translation(axis: Vec3, length: f64) -> Self {
        Self {
            axis,
            length,
            mode: JointMode::Translation,
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, min_limit: f64, max_limit: f64) -> Self {
        self.min_limit = min_limit;
        self.max_limit = max_limit;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Clamp `value` into `[min_limit, max_limit]`.
    ///
    /// An inverted range (`min_limit > max_limit`) clamps to `min_limit`.
    /// A NaN limit leaves that side unbounded. A NaN `value` is returned
    /// unchanged rather than snapped to a limit.
    pub fn clamp_value(&self, value: f64) -> f64 {
        if self.min_limit > self.max_limit {
            return self.min_limit;
        }
        if value.is_nan() {
            return value;
        }
        value.max(self.min_limit).min(self.max_limit)
    }

    /// Whether `value` currently lies within the joint limits.
    pub fn within_limits(&self) -> bool {
        self.value >= self.min_limit && self.value <= self.max_limit
    }

    /// Check the spec for inverted limits and non-finite geometry.
    ///
    /// `index` is the joint's position in its chain, used in the error.
    pub fn validate(&self, index: usize) -> Result<(), ChainIkError> {
        let non_finite = |field: &str| ChainIkError::NonFinite {
            field: field.to_string(),
            index: Some(index),
        };

        if !self.axis.iter().all(|c| c.is_finite()) {
            return Err(non_finite("axis"));
        }
        if !self.length.is_finite() {
            return Err(non_finite("length"));
        }
        if !self.value.is_finite() {
            return Err(non_finite("value"));
        }
        if self.min_limit.is_nan() {
            return Err(non_finite("minLimit"));
        }
        if self.max_limit.is_nan() {
            return Err(non_finite("maxLimit"));
        }
        if self.min_limit > self.max_limit {
            return Err(ChainIkError::InvertedLimits {
                index,
                min: self.min_limit,
                max: self.max_limit,
            });
        }
        Ok(())
    }
}

/// World-space result of forward kinematics for one joint.
///
/// Recomputed on every evaluation; never cached across solver iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointState {
    /// Pivot point of the joint.
    pub position: Vec3,
    /// Joint axis after all parent rotations, normalized (or zero).
    pub axis_world: Vec3,
    pub mode: JointMode,
}

/// Joint limits travel as `null` when unbounded, since JSON has no infinity.
mod limit {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if v.is_finite() {
            serializer.serialize_some(v)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize_min<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
    }

    pub fn deserialize_max<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec() {
        let spec = JointSpec::default();
        assert_eq!(spec.axis, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(spec.mode, JointMode::Rotation);
        assert_eq!(spec.min_limit, f64::NEG_INFINITY);
        assert_eq!(spec.max_limit, f64::INFINITY);
        assert_eq!(spec.value, 0.0);
        assert!(spec.name.is_empty());
    }

    #[test]
    fn test_mode_discriminants() {
        assert_eq!(u8::from(JointMode::Rotation), 0);
        assert_eq!(u8::from(JointMode::Translation), 1);
        assert_eq!(JointMode::try_from(1u8), Ok(JointMode::Translation));
        assert!(JointMode::try_from(7u8).is_err());
    }

    #[test]
    fn test_clamp_value() {
        let spec = JointSpec::rotation(Vec3::z(), 1.0).with_limits(-0.5, 0.5);
        assert_eq!(spec.clamp_value(2.0), 0.5);
        assert_eq!(spec.clamp_value(-2.0), -0.5);
        assert_eq!(spec.clamp_value(0.25), 0.25);
    }

    #[test]
    fn test_clamp_inverted_limits_picks_min() {
        let spec = JointSpec::rotation(Vec3::z(), 1.0).with_limits(1.0, -1.0);
        assert_eq!(spec.clamp_value(0.0), 1.0);
        assert_eq!(spec.clamp_value(-3.0), 1.0);
    }

    #[test]
    fn test_clamp_passes_nan_through() {
        let limited = JointSpec::rotation(Vec3::z(), 1.0).with_limits(-0.5, 0.5);
        assert!(limited.clamp_value(f64::NAN).is_nan());

        let free = JointSpec::rotation(Vec3::z(), 1.0);
        assert!(free.clamp_value(f64::NAN).is_nan());
    }

    #[test]
    fn test_clamp_unbounded() {
        let spec = JointSpec::translation(Vec3::x(), 0.0);
        assert_eq!(spec.clamp_value(1e9), 1e9);
        assert_eq!(spec.clamp_value(-1e9), -1e9);
    }

    #[test]
    fn test_validate() {
        let ok = JointSpec::rotation(Vec3::y(), 0.3).with_limits(-1.0, 1.0);
        assert!(ok.validate(0).is_ok());

        let inverted = ok.clone().with_limits(1.0, -1.0);
        assert_eq!(
            inverted.validate(3),
            Err(ChainIkError::InvertedLimits { index: 3, min: 1.0, max: -1.0 })
        );

        let mut bad_axis = ok.clone();
        bad_axis.axis.x = f64::NAN;
        assert!(matches!(
            bad_axis.validate(1),
            Err(ChainIkError::NonFinite { index: Some(1), .. })
        ));
    }

    #[test]
    fn test_json_field_names() {
        let spec = JointSpec::translation(Vec3::x(), 2.0)
            .with_limits(0.0, 1.5)
            .with_name("slide");
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["axis"]["x"], 1.0);
        assert_eq!(json["mode"], "Translation");
        assert_eq!(json["minLimit"], 0.0);
        assert_eq!(json["maxLimit"], 1.5);
        assert_eq!(json["name"], "slide");
    }

    #[test]
    fn test_json_unbounded_limits_are_null() {
        let json = serde_json::to_value(JointSpec::default()).unwrap();
        assert!(json["minLimit"].is_null());
        assert!(json["maxLimit"].is_null());

        let back: JointSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back.min_limit, f64::NEG_INFINITY);
        assert_eq!(back.max_limit, f64::INFINITY);
    }

    #[test]
    fn test_json_missing_fields_use_defaults() {
        let spec: JointSpec = serde_json::from_str(r#"{ "length": 0.5, "value": 0.1 }"#).unwrap();
        assert_eq!(spec.axis, Vec3::z());
        assert_eq!(spec.mode, JointMode::Rotation);
        assert_eq!(spec.length, 0.5);
        assert_eq!(spec.min_limit, f64::NEG_INFINITY);
        assert_eq!(spec.max_limit, f64::INFINITY);
    }
}
