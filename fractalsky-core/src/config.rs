use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Engine tuning knobs. Every field has a default, so an empty JSON object
/// is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of symmetric workers; 0 uses the available parallelism.
    pub worker_count: usize,
    /// Pixels claimed per step by the compute loop.
    pub compute_chunk: usize,
    /// Pixels claimed per step by the recolor loop.
    pub colorize_chunk: usize,
    pub initial_cost_budget: i64,
    pub min_cost_budget: i64,
    /// Budget growth factor; higher values aim for fewer, longer passes.
    pub target_passes_per_second: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: 0,
            compute_chunk: 32,
            colorize_chunk: 4096,
            initial_cost_budget: 200_000,
            min_cost_budget: 5_000,
            target_passes_per_second: 3.45,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compute_chunk == 0 {
            return Err(ConfigError::Zero {
                field: "compute_chunk",
            });
        }
        if self.colorize_chunk == 0 {
            return Err(ConfigError::Zero {
                field: "colorize_chunk",
            });
        }
        if self.min_cost_budget <= 0 {
            return Err(ConfigError::Zero {
                field: "min_cost_budget",
            });
        }
        if self.min_cost_budget > self.initial_cost_budget {
            return Err(ConfigError::BudgetOrder {
                min: self.min_cost_budget,
                initial: self.initial_cost_budget,
            });
        }
        if self.target_passes_per_second.is_nan() || self.target_passes_per_second <= 0.0 {
            return Err(ConfigError::Zero {
                field: "target_passes_per_second",
            });
        }
        Ok(())
    }

    /// Worker count with 0 resolved to the machine's parallelism.
    pub fn resolved_worker_count(&self) -> usize {
        if self.worker_count > 0 {
            return self.worker_count;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or_else(|_| {
                log::warn!("available_parallelism unavailable, using one worker");
                1
            })
    }
}
