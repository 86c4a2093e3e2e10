//! Match configuration - who plays which mark and how the computer searches

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ai::{MinimaxAI, Scoring};
use crate::board::Mark;
use crate::error::{EngineError, Result};

/// Which participant moves first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Human,
    Computer,
}

/// Match configuration (all fields optional in JSON)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub human_mark: Mark,
    pub computer_mark: Mark,
    pub first_mover: Side,
    pub scoring: Scoring,
    pub pruning: bool,
    /// Pause before the computer replies, for display pacing only
    pub computer_delay_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            computer_mark: Mark::O,
            first_mover: Side::Human,
            scoring: Scoring::Perfect,
            pruning: true,
            computer_delay_ms: 0,
        }
    }
}

impl MatchConfig {
    /// Load from a JSON file and validate
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: MatchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .with_context(|| format!("Failed to serialize config: {}", path.display()))?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.human_mark == self.computer_mark {
            return Err(EngineError::InvalidConfig(format!(
                "human and computer both play {}",
                self.human_mark
            )));
        }
        Ok(())
    }

    /// Mark that opens the game
    pub fn first_mark(&self) -> Mark {
        match self.first_mover {
            Side::Human => self.human_mark,
            Side::Computer => self.computer_mark,
        }
    }

    pub fn build_ai(&self) -> MinimaxAI {
        MinimaxAI::with_options(self.scoring, self.pruning)
    }
}
