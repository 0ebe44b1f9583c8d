//! Model Limits Module
//! Checks whether a loaded dataset fits the tabular model's input size.

use polars::prelude::*;
use thiserror::Error;

/// Largest number of training rows the model accepts.
pub const MAX_INPUT_ROWS: usize = 1000;
/// Largest number of feature columns the model accepts.
pub const MAX_FEATURES: usize = 100;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LimitsError {
    #[error("Dataset has {rows} rows, limit is {max}")]
    TooManyRows { rows: usize, max: usize },
    #[error("Dataset has {features} features, limit is {max}")]
    TooManyFeatures { features: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelLimits {
    pub max_rows: usize,
    pub max_features: usize,
}

impl Default for ModelLimits {
    fn default() -> Self {
        Self {
            max_rows: MAX_INPUT_ROWS,
            max_features: MAX_FEATURES,
        }
    }
}

impl ModelLimits {
    /// Rows are checked before features. Every column counts as a feature.
    pub fn check(&self, df: &DataFrame) -> Result<(), LimitsError> {
        if df.height() > self.max_rows {
            return Err(LimitsError::TooManyRows {
                rows: df.height(),
                max: self.max_rows,
            });
        }
        if df.width() > self.max_features {
            return Err(LimitsError::TooManyFeatures {
                features: df.width(),
                max: self.max_features,
            });
        }
        Ok(())
    }

    pub fn fits(&self, df: &DataFrame) -> bool {
        self.check(df).is_ok()
    }
}
