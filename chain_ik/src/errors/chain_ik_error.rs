use std::error::Error;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Errors raised at the configuration boundary.
///
/// Numerical trouble inside a solve is never an error; it shows up in the
/// residual returned by [`IkSolver::solve`](crate::IkSolver::solve).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ChainIkError {
    Serialization(String),
    Io(String),
    InvertedLimits { index: usize, min: f64, max: f64 },
    NonFinite { field: String, index: Option<usize> },
    InvalidConfig(String),
}

impl Error for ChainIkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for ChainIkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChainIkError::Serialization(ref msg) => write!(f, "Serialization error: {}", msg),
            ChainIkError::Io(ref msg) => write!(f, "Could not read chain config: {}", msg),
            ChainIkError::InvertedLimits { index, min, max } => write!(
                f,
                "Joint {} has minLimit {} greater than maxLimit {}",
                index, min, max
            ),
            ChainIkError::NonFinite { ref field, index: Some(index) } => {
                write!(f, "Joint {} has a non-finite {}", index, field)
            }
            ChainIkError::NonFinite { ref field, index: None } => {
                write!(f, "Non-finite {}", field)
            }
            ChainIkError::InvalidConfig(ref msg) => write!(f, "Invalid solver config: {}", msg),
        }
    }
}

impl From<serde_json::Error> for ChainIkError {
    fn from(e: serde_json::Error) -> Self {
        ChainIkError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for ChainIkError {
    fn from(e: std::io::Error) -> Self {
        ChainIkError::Io(e.to_string())
    }
}
