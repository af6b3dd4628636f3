//! Validation errors for render parameters and engine configuration.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("Unknown fractal type {0}")]
    UnknownFamily(i32),

    #[error("Unknown shading mode {0}")]
    UnknownShading(i32),

    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Iteration cap must be at least 1, got {0}")]
    InvalidIterationCap(i64),

    #[error("Plane step must be finite and positive, got {0}")]
    InvalidStep(f64),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Cost budget must be non-negative, got {0}")]
    InvalidCostBudget(i64),

    #[error("Cycle speed must be finite and non-negative, got {0}")]
    InvalidCycleSpeed(f32),

    #[error("Flow offset must be finite and non-negative, got {0}")]
    InvalidFlowOffset(f32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("min_cost_budget ({min}) exceeds initial_cost_budget ({initial})")]
    BudgetOrder { min: i64, initial: i64 },
}
