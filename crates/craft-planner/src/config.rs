//! Planner configuration loading.

use std::path::Path;

use anyhow::{Context, Result};
use craft_tree::BuilderOptions;
use serde::{Deserialize, Serialize};

/// Planner configuration, loaded from .craftplan/config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Plans taken from each enumeration strategy before ranking
    pub per_strategy: usize,

    /// Plans returned after ranking
    pub top: usize,

    /// Run the strategies on blocking workers
    pub parallel: bool,

    /// Prune trees against the world snapshot when one is given
    pub prune_with_world: bool,

    /// Treat sources farther than this as absent
    pub max_distance: Option<f64>,

    /// Tree construction knobs, including the variant selection policy
    pub builder: BuilderOptions,

    pub optimizers: OptimizerConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            per_strategy: 20,
            top: 10,
            parallel: false,
            prune_with_world: true,
            max_distance: None,
            builder: BuilderOptions::default(),
            optimizers: OptimizerConfig::default(),
        }
    }
}

/// Post-processing passes applied to ranked plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub hoist_mining: bool,
    pub dedupe_persistent: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            hoist_mining: true,
            dedupe_persistent: true,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from a directory (looks for .craftplan/config.yaml), falling back to defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(".craftplan/config.yaml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}
