//! Mining configuration.

use serde::{Deserialize, Serialize};

use crate::types::{ArmError, ArmResult};

/// Default discretization window width.
pub const DEFAULT_WINDOW_WIDTH: usize = 3;

/// Default alphabet size.
pub const DEFAULT_ALPHABET_SIZE: usize = 4;

/// Default minimum itemset support.
pub const DEFAULT_MIN_SUPPORT: f64 = 0.01;

/// Default minimum rule confidence.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// Parameters for one SAX-ARM run.
///
/// `window_width` and `alphabet_size` are handed to the discretizer as-is;
/// the thresholds drive the miner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    pub window_width: usize,
    pub alphabet_size: usize,
    pub min_support: f64,
    pub min_confidence: f64,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            alphabet_size: DEFAULT_ALPHABET_SIZE,
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl ArmConfig {
    pub fn with_window_width(mut self, window_width: usize) -> Self {
        self.window_width = window_width;
        self
    }

    pub fn with_alphabet_size(mut self, alphabet_size: usize) -> Self {
        self.alphabet_size = alphabet_size;
        self
    }

    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Check every parameter is in range.
    pub fn validate(&self) -> ArmResult<()> {
        if self.window_width == 0 {
            return Err(ArmError::InvalidConfig("window_width must be at least 1".to_string()));
        }
        // Top and bottom symbols must be distinct.
        if self.alphabet_size < 2 {
            return Err(ArmError::InvalidConfig(format!(
                "alphabet_size must be at least 2, got {}",
                self.alphabet_size
            )));
        }
        check_threshold("min_support", self.min_support)?;
        check_threshold("min_confidence", self.min_confidence)
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ArmResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Reject thresholds outside `[0, 1]`, including NaN.
pub(crate) fn check_threshold(name: &str, value: f64) -> ArmResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ArmError::InvalidConfig(format!("{name} must be within [0, 1], got {value}")))
    }
}
