use super::candidates::JoinStrategy;
use crate::error::{AprioriError, Result};
use serde::{Deserialize, Serialize};

/// Thresholds for a mining run. Both fractions lie in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningParams {
    pub min_support: f64,
    pub min_confidence: f64,
    pub join: JoinStrategy,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            min_support: 0.5,
            min_confidence: 0.5,
            join: JoinStrategy::Union,
        }
    }
}

impl MiningParams {
    pub fn new(min_support: f64, min_confidence: f64) -> Result<Self> {
        let params = Self {
            min_support,
            min_confidence,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_join(mut self, join: JoinStrategy) -> Self {
        self.join = join;
        self
    }

    /// Parses a flat TOML document such as
    ///
    /// ```toml
    /// min_support = 0.4
    /// min_confidence = 0.6
    /// join = "prefix"
    /// ```
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let params: Self = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        check_fraction("min_support", self.min_support)?;
        check_fraction("min_confidence", self.min_confidence)
    }
}

pub(crate) fn check_fraction(name: &'static str, value: f64) -> Result<()> {
    // NaN fails both comparisons.
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(AprioriError::InvalidParameter { name, value })
    }
}
