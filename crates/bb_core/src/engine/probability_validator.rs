// ============================================================================
// Outcome Distribution Validation
// ============================================================================
//
// Contract: the five outcome rates are non-negative and sum to 1.0 within
// tolerance before a draw is sampled against them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::probability::OutcomeRates;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("Empty probability distribution")]
    Empty,

    #[error("Negative probability at index {index}: {value}")]
    Negative { index: usize, value: f64 },

    #[error("Non-finite probability at index {index}")]
    NotFinite { index: usize },

    #[error("Probability sum {sum:.12} deviates from 1.0 (tolerance: {tolerance:e})")]
    BadSum { sum: f64, tolerance: f64 },
}

/// Checks that a distribution is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityValidator {
    /// Maximum allowed deviation of the sum from 1.0
    tolerance: f64,
}

impl ProbabilityValidator {
    /// Default tolerance (1e-6)
    pub fn new() -> Self {
        Self { tolerance: 1e-6 }
    }

    /// Tolerance used for the closure property of outcome rates (1e-9)
    pub fn strict() -> Self {
        Self { tolerance: 1e-9 }
    }

    /// # Examples
    /// ```
    /// use bb_core::engine::probability_validator::ProbabilityValidator;
    ///
    /// let lenient = ProbabilityValidator::with_tolerance(0.01);
    /// assert!(lenient.validate_distribution(&[0.33, 0.33, 0.33]).is_ok());
    /// ```
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn validate_distribution(&self, probabilities: &[f64]) -> Result<(), DistributionError> {
        if probabilities.is_empty() {
            return Err(DistributionError::Empty);
        }
        for (index, &value) in probabilities.iter().enumerate() {
            if !value.is_finite() {
                return Err(DistributionError::NotFinite { index });
            }
            if value < 0.0 {
                return Err(DistributionError::Negative { index, value });
            }
        }

        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > self.tolerance {
            return Err(DistributionError::BadSum { sum, tolerance: self.tolerance });
        }
        Ok(())
    }

    pub fn validate_rates(&self, rates: &OutcomeRates) -> Result<(), DistributionError> {
        self.validate_distribution(&rates.as_array())
    }
}

impl Default for ProbabilityValidator {
    fn default() -> Self {
        Self::new()
    }
}
