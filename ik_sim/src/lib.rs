// Library exports for the chain IK parity sweep

pub mod profiles;
pub mod sweep;

pub use profiles::{ChainProfile, TargetRegion};
pub use sweep::{ParkMiller, SweepConfig, SweepSummary};
