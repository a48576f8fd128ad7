//! Search parameters for both engines.

use serde::{Deserialize, Serialize};

use crate::domino::{DominoError, Result};

/// Expectiminimax parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectiminimaxConfig {
    /// Plies searched below the root, counting max, chance and min layers.
    /// Cost grows as branching^depth; values above 10 are impractical.
    pub depth: usize,
}

impl Default for ExpectiminimaxConfig {
    fn default() -> Self {
        Self { depth: 4 }
    }
}

impl ExpectiminimaxConfig {
    pub fn with_depth(depth: usize) -> Self {
        Self { depth }
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(DominoError::InvalidConfig("depth must be positive".to_string()));
        }
        Ok(())
    }
}

/// ISMCTS parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsmctsConfig {
    /// Search iterations per decision, one determinization each.
    pub iterations: u32,

    /// Exploration constant of the UCB1 rule.
    pub exploration: f32,

    /// Largest number of opponent-hand combinations that is still enumerated in full.
    /// Above it, `determinization_samples` are drawn at random instead.
    pub enumeration_limit: u64,

    /// Determinizations drawn per decision once enumeration is out of reach.
    pub determinization_samples: usize,

    /// Independent trees grown in parallel; their root visit counts are summed.
    pub threads: usize,

    /// Keep tiles with pips the opponent is known to lack out of the hypothetical opponent hand.
    pub use_inference: bool,
}

impl Default for IsmctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: 0.7,
            enumeration_limit: 4096,
            determinization_samples: 512,
            threads: 1,
            use_inference: false,
        }
    }
}

impl IsmctsConfig {
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(DominoError::InvalidConfig("iterations must be positive".to_string()));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(DominoError::InvalidConfig(format!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            )));
        }
        if self.determinization_samples == 0 {
            return Err(DominoError::InvalidConfig(
                "determinization_samples must be positive".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(DominoError::InvalidConfig("threads must be positive".to_string()));
        }
        Ok(())
    }
}
