use serde::{Serialize, Deserialize};

use crate::Float;
use crate::error::{ClassifyError, Result};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SvmRuntimeParams {
    /// Soft margin penalty.
    pub c: Float,
    /// Epochs of dual coordinate descent per binary problem.
    pub max_iterations: usize,
    /// Stop once the projected gradient spread falls below this.
    pub tolerance: Float,
    pub seed: u64
}

impl Default for SvmRuntimeParams {
    fn default() -> SvmRuntimeParams {
        SvmRuntimeParams {
            c: 1.0,
            max_iterations: 1000,
            tolerance: 0.1,
            seed: 0x0DDB1A5ECBAD5EED
        }
    }
}

impl SvmRuntimeParams {
    pub fn validate(&self) -> Result<()> {
        match self {
            p if p.c <= 0.0 || !p.c.is_finite() => Err(ClassifyError::InvalidParameters(format!("svm penalty must be positive, got {}", p.c))),
            p if p.max_iterations == 0 => Err(ClassifyError::InvalidParameters("svm needs at least one iteration".to_string())),
            p if p.tolerance <= 0.0 => Err(ClassifyError::InvalidParameters(format!("svm tolerance must be positive, got {}", p.tolerance))),
            _ => Ok(())
        }
    }
}
