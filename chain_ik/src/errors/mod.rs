mod chain_ik_error;
pub use chain_ik_error::*;
