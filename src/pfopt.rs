use crate::error::{LoadFlowError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct PFOpt {
    // System base apparent power (MVA). Default value is 100.
    pub base_mva: f64,

    // Termination tolerance on per unit P & Q mismatch. Default value is 1e-5.
    pub tolerance: f64,

    // Maximum number of iterations for Newton's method. Default value is 100.
    pub max_it: usize,
}

impl Default for PFOpt {
    fn default() -> Self {
        Self {
            base_mva: 100.0,
            tolerance: 1e-5,
            max_it: 100,
        }
    }
}

impl PFOpt {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_mva.is_finite() && self.base_mva > 0.0) {
            return Err(LoadFlowError::InvalidOption(format!(
                "base MVA must be positive, got {}",
                self.base_mva
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(LoadFlowError::InvalidOption(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
