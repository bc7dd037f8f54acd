//! Cost configuration: variable-cost percentages, fixed-cost amounts,
//! baseline revenue.

use serde::{Deserialize, Serialize};

/// Per-account cost configuration.
///
/// A flat record; every field defaults to zero when absent so a half-filled
/// configuration never crashes the arithmetic. Variable costs are percentages
/// of the eventual sale price; fixed costs are monetary amounts per period.
/// The engine performs no range clamping — input bounds are a UI concern.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Variable costs, each a percentage of the sale price.
    pub taxes_pct: f64,
    pub royalties_pct: f64,
    pub management_pct: f64,
    pub card_fee_pct: f64,
    pub condo_share_pct: f64,
    pub investor_pct: f64,

    // Fixed costs, each an amount per period.
    pub monitoring: f64,
    pub fuel: f64,
    pub kiosk: f64,
    pub accounting: f64,
    pub internet: f64,
    pub phone: f64,
    pub insurance: f64,
    pub payroll: f64,
    pub rent: f64,
    pub other: f64,

    /// Expected period revenue. Zero (or absent) means fixed costs cannot be
    /// expressed as a percentage of revenue and contribute 0 to the markup.
    pub baseline_revenue: f64,
}

impl Config {
    /// Sum of the six variable-cost percentages.
    pub fn total_variable_pct(&self) -> f64 {
        self.taxes_pct
            + self.royalties_pct
            + self.management_pct
            + self.card_fee_pct
            + self.condo_share_pct
            + self.investor_pct
    }

    /// Sum of the ten fixed-cost amounts.
    pub fn total_fixed(&self) -> f64 {
        self.monitoring
            + self.fuel
            + self.kiosk
            + self.accounting
            + self.internet
            + self.phone
            + self.insurance
            + self.payroll
            + self.rent
            + self.other
    }
}
