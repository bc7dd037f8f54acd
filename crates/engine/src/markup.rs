//! Markup derivation: cost configuration to markup divisor/multiplier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// The engine's sole failure mode: total expenses reach or exceed 100% of the
/// sale price, so no positive markup can cover them.
///
/// Carried as a value inside [`MarkupResult`] rather than returned as `Err`.
/// An infeasible configuration degrades softly — zero multiplier, zero
/// suggested prices — instead of aborting the computation path, so callers
/// must check [`MarkupResult::error`] and surface it to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
#[error(
    "markup divisor is {divisor:.4}: total expenses ({total_expense_pct:.2}%) consume 100% or more of the sale price"
)]
pub struct InfeasibleCostStructure {
    pub divisor: f64,
    pub total_expense_pct: f64,
}

/// Output of [`derive_markup`].
///
/// A pure function's output: recompute it whenever the configuration changes,
/// never persist it independently of the [`Config`] it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkupResult {
    /// Sum of the variable-cost percentages.
    pub total_variable_pct: f64,
    /// Sum of the fixed-cost amounts.
    pub total_fixed: f64,
    /// Fixed costs as a percentage of baseline revenue (0 when revenue is 0).
    pub fixed_pct_of_revenue: f64,
    pub total_expense_pct: f64,
    /// `1 − total_expense_pct / 100`.
    pub divisor: f64,
    /// `1 / divisor`, or 0 when the cost structure is infeasible.
    pub multiplier: f64,
    pub error: Option<InfeasibleCostStructure>,
    /// Echo of the configured baseline revenue.
    pub baseline_revenue: f64,
}

impl MarkupResult {
    pub fn is_feasible(&self) -> bool {
        self.error.is_none()
    }
}

/// Derive the markup divisor/multiplier from a cost configuration.
///
/// Deterministic and side-effect free: the same configuration always produces
/// a bit-identical result, so callers may cache by configuration.
pub fn derive_markup(config: &Config) -> MarkupResult {
    let total_variable_pct = config.total_variable_pct();
    let total_fixed = config.total_fixed();
    let baseline_revenue = config.baseline_revenue;

    // Without a baseline revenue, fixed costs cannot be expressed relative to
    // the sale price; they contribute nothing to the markup.
    let fixed_pct_of_revenue = if baseline_revenue > 0.0 {
        total_fixed / baseline_revenue * 100.0
    } else {
        0.0
    };

    let total_expense_pct = total_variable_pct + fixed_pct_of_revenue;
    let divisor = 1.0 - total_expense_pct / 100.0;

    let (multiplier, error) = if divisor > 0.0 {
        (1.0 / divisor, None)
    } else {
        (
            0.0,
            Some(InfeasibleCostStructure {
                divisor,
                total_expense_pct,
            }),
        )
    };

    tracing::debug!(
        total_expense_pct,
        multiplier,
        feasible = error.is_none(),
        "derived markup"
    );

    MarkupResult {
        total_variable_pct,
        total_fixed,
        fixed_pct_of_revenue,
        total_expense_pct,
        divisor,
        multiplier,
        error,
        baseline_revenue,
    }
}

/// Outcome of a configuration pre-flight check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConfigCheck {
    /// Markup can be derived and applied.
    Valid,
    /// No baseline revenue configured: fixed costs will be excluded from the
    /// markup until one is set. Advisory, not an error.
    NoBaselineRevenue,
    /// Total expenses consume the whole sale price.
    Infeasible(InfeasibleCostStructure),
}

/// Check a configuration before saving it, reporting the states an operator
/// should be warned about.
pub fn check_config(config: &Config) -> ConfigCheck {
    if config.baseline_revenue <= 0.0 {
        return ConfigCheck::NoBaselineRevenue;
    }
    match derive_markup(config).error {
        Some(err) => ConfigCheck::Infeasible(err),
        None => ConfigCheck::Valid,
    }
}
