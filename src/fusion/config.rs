//! Configuration for rank fusion.
//!
//! # Examples
//!
//! ```
//! use rankfuse::fusion::config::{FusionConfig, TieBreak};
//!
//! // Defaults: top 3, k = 60, ties broken by first occurrence
//! let config = FusionConfig::default();
//! assert_eq!(config.max_results, 3);
//! assert_eq!(config.fusion_constant, 60.0);
//! assert_eq!(config.tie_break, TieBreak::FirstOccurrence);
//!
//! let custom = FusionConfig::new()
//!     .with_max_results(10)
//!     .with_fusion_constant(20.0)
//!     .with_tie_break(TieBreak::DocumentId);
//! assert!(custom.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RankFuseError, Result};

/// Default RRF smoothing constant.
pub const DEFAULT_FUSION_CONSTANT: f64 = 60.0;

/// Default number of fused results returned.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// How documents with equal fused scores are ordered.
///
/// Summed floating-point scores tie often (a document at positions 0 and 1
/// scores the same as one at 1 and 0), so the rule has to be explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier first appearance across the input sets wins (set order, then
    /// position order).
    #[default]
    FirstOccurrence,
    /// Lexicographically smaller document id wins.
    DocumentId,
}

/// Parameters of a fusion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Maximum number of fused results.
    pub max_results: usize,
    /// RRF constant `k`; larger values flatten the score curve.
    pub fusion_constant: f64,
    /// Ordering rule for equal scores.
    pub tie_break: TieBreak,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            fusion_constant: DEFAULT_FUSION_CONSTANT,
            tie_break: TieBreak::default(),
        }
    }
}

/// On-disk form of [`FusionConfig`]. The limit is signed so that a negative
/// value is reported as invalid configuration rather than a parse failure.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawFusionConfig {
    max_results: i64,
    fusion_constant: f64,
    tie_break: TieBreak,
}

impl Default for RawFusionConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS as i64,
            fusion_constant: DEFAULT_FUSION_CONSTANT,
            tie_break: TieBreak::default(),
        }
    }
}

impl FusionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validated configuration from a possibly negative limit.
    pub fn from_signed(max_results: i64, fusion_constant: f64) -> Result<Self> {
        let max_results = usize::try_from(max_results).map_err(|_| {
            RankFuseError::invalid_config(format!(
                "max_results must be >= 0, got {max_results}"
            ))
        })?;
        let config = Self::default()
            .with_max_results(max_results)
            .with_fusion_constant(fusion_constant);
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawFusionConfig = serde_json::from_str(json)?;
        let config = Self::from_signed(raw.max_results, raw.fusion_constant)?;
        Ok(config.with_tie_break(raw.tie_break))
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        log::debug!("loaded fusion config from {}", path.as_ref().display());
        Self::from_json_str(&content)
    }

    /// Set the maximum number of fused results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the fusion constant.
    pub fn with_fusion_constant(mut self, fusion_constant: f64) -> Self {
        self.fusion_constant = fusion_constant;
        self
    }

    /// Set the tie-break rule.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.fusion_constant.is_finite() || self.fusion_constant <= 0.0 {
            return Err(RankFuseError::invalid_config(format!(
                "fusion_constant must be a finite value > 0, got {}",
                self.fusion_constant
            )));
        }

        Ok(())
    }
}
