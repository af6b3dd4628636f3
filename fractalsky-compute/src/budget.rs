//! Per-worker cost budgets that adapt to how long passes take.

use crate::PassOutcome;
use fractalsky_core::EngineConfig;

/// Budget slack added before scaling by pass time.
const BUDGET_SLACK: f64 = 5000.0;

/// Tracks one cost budget per worker and nudges them toward
/// `target_passes_per_second`.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetTuner {
    budgets: Vec<i64>,
    initial_budget: i64,
    min_budget: f64,
    rate: f64,
    last_elapsed_ms: f64,
}

impl BudgetTuner {
    pub fn new(worker_count: usize, config: &EngineConfig) -> Self {
        Self {
            budgets: vec![config.initial_cost_budget; worker_count],
            initial_budget: config.initial_cost_budget,
            min_budget: config.min_cost_budget as f64,
            rate: config.target_passes_per_second,
            last_elapsed_ms: 1.0,
        }
    }

    pub fn budgets(&self) -> &[i64] {
        &self.budgets
    }

    /// Back to the initial budget for every worker.
    pub fn reset(&mut self) {
        self.budgets.fill(self.initial_budget);
        self.last_elapsed_ms = 1.0;
    }

    /// Adjust after a pass that took `elapsed_ms`.
    ///
    /// Each suspended worker is first adjusted against the previous pass
    /// time; then, if anyone suspended, every worker is adjusted against
    /// this one. A pass where everyone completed leaves budgets alone.
    pub fn record_pass(&mut self, outcomes: &[PassOutcome], elapsed_ms: f64) {
        let elapsed_ms = elapsed_ms.max(1.0);
        let mut suspended = false;
        for (budget, outcome) in self.budgets.iter_mut().zip(outcomes) {
            if !outcome.is_complete() {
                *budget = adapt(*budget, self.last_elapsed_ms, self.rate, self.min_budget);
                suspended = true;
            }
        }
        self.last_elapsed_ms = elapsed_ms;
        if suspended {
            for budget in &mut self.budgets {
                *budget = adapt(*budget, elapsed_ms, self.rate, self.min_budget);
            }
            log::trace!("Adapted budgets after {:.1}ms: {:?}", elapsed_ms, self.budgets);
        }
    }
}

/// `0.9·b + max(min(rate·(b + slack)/(ms + 1), b/4), min)`
fn adapt(budget: i64, elapsed_ms: f64, rate: f64, min_budget: f64) -> i64 {
    let b = budget as f64;
    let growth = (rate * ((b + BUDGET_SLACK) / (elapsed_ms + 1.0))).min(b * 0.25);
    (0.9 * b + growth.max(min_budget)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn starts_at_initial_budget() {
        let tuner = BudgetTuner::new(3, &config());
        assert_eq!(tuner.budgets(), &[200_000; 3]);
    }

    #[test]
    fn slow_passes_shrink_budgets() {
        // 3.45 · 205000 / 1001 ≈ 706, below the 5000 floor
        assert_eq!(adapt(200_000, 1000.0, 3.45, 5000.0), 185_000);
    }

    #[test]
    fn fast_passes_grow_by_at_most_a_quarter() {
        assert_eq!(adapt(200_000, 1.0, 3.45, 5000.0), 230_000);
    }

    #[test]
    fn small_budgets_settle_at_ten_times_the_floor() {
        let mut budget = 5000;
        for _ in 0..300 {
            budget = adapt(budget, 10_000.0, 3.45, 5000.0);
        }
        assert!((49_900..=50_000).contains(&budget), "{budget}");
    }

    #[test]
    fn completed_pass_leaves_budgets_alone() {
        let mut tuner = BudgetTuner::new(2, &config());
        tuner.record_pass(&[PassOutcome::Complete; 2], 500.0);
        assert_eq!(tuner.budgets(), &[200_000; 2]);
    }

    #[test]
    fn suspended_worker_is_adjusted_twice() {
        let mut tuner = BudgetTuner::new(2, &config());
        tuner.record_pass(
            &[PassOutcome::Suspended { resume_at: 32 }, PassOutcome::Complete],
            1000.0,
        );
        let first = adapt(adapt(200_000, 1.0, 3.45, 5000.0), 1000.0, 3.45, 5000.0);
        let second = adapt(200_000, 1000.0, 3.45, 5000.0);
        assert_eq!(tuner.budgets(), &[first, second]);

        tuner.reset();
        assert_eq!(tuner.budgets(), &[200_000; 2]);
    }
}
