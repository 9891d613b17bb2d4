//! Numeric compliance bounds.
//!
//! Defaults are the MSE-CDP scheme limits. Strictness is part of the contract:
//! `dscr`, `npv`, and `irr` must be strictly greater than their floor, break-even
//! strictly below its ceiling, and project cost at most its ceiling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_max_project_cost() -> f64 {
    300_000_000.0
}

const fn default_grant_pct_min() -> f64 {
    60.0
}

const fn default_grant_pct_max() -> f64 {
    80.0
}

const fn default_min_dscr() -> f64 {
    3.0
}

const fn default_max_breakeven_pct() -> f64 {
    60.0
}

const fn default_min_irr_pct() -> f64 {
    10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyBounds {
    /// Ceiling on total project cost in rupees (₹30 crore).
    #[serde(default = "default_max_project_cost")]
    pub max_project_cost: f64,
    /// Lowest admissible grant share, percent.
    #[serde(default = "default_grant_pct_min")]
    pub grant_pct_min: f64,
    /// Highest admissible grant share, percent.
    #[serde(default = "default_grant_pct_max")]
    pub grant_pct_max: f64,
    /// DSCR must exceed this ratio.
    #[serde(default = "default_min_dscr")]
    pub min_dscr: f64,
    /// Break-even utilisation must stay below this percentage.
    #[serde(default = "default_max_breakeven_pct")]
    pub max_breakeven_pct: f64,
    /// NPV must exceed this amount.
    #[serde(default)]
    pub min_npv: f64,
    /// IRR must exceed this percentage.
    #[serde(default = "default_min_irr_pct")]
    pub min_irr_pct: f64,
}

impl PolicyBounds {
    #[must_use]
    pub fn cost_within_ceiling(&self, cost: f64) -> bool {
        cost <= self.max_project_cost
    }

    #[must_use]
    pub fn grant_within_range(&self, pct: f64) -> bool {
        (self.grant_pct_min..=self.grant_pct_max).contains(&pct)
    }

    #[must_use]
    pub fn dscr_ok(&self, dscr: f64) -> bool {
        dscr > self.min_dscr
    }

    #[must_use]
    pub fn breakeven_ok(&self, pct: f64) -> bool {
        pct < self.max_breakeven_pct
    }

    #[must_use]
    pub fn npv_ok(&self, npv: f64) -> bool {
        npv > self.min_npv
    }

    #[must_use]
    pub fn irr_ok(&self, irr: f64) -> bool {
        irr > self.min_irr_pct
    }
}

impl Default for PolicyBounds {
    fn default() -> Self {
        Self {
            max_project_cost: default_max_project_cost(),
            grant_pct_min: default_grant_pct_min(),
            grant_pct_max: default_grant_pct_max(),
            min_dscr: default_min_dscr(),
            max_breakeven_pct: default_max_breakeven_pct(),
            min_npv: 0.0,
            min_irr_pct: default_min_irr_pct(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_strict_where_documented() {
        let bounds = PolicyBounds::default();
        assert!(!bounds.dscr_ok(3.0));
        assert!(bounds.dscr_ok(3.01));
        assert!(!bounds.breakeven_ok(60.0));
        assert!(bounds.breakeven_ok(59.9));
        assert!(!bounds.npv_ok(0.0));
        assert!(!bounds.irr_ok(10.0));
        assert!(bounds.irr_ok(15.5));
    }

    #[test]
    fn cost_ceiling_is_inclusive() {
        let bounds = PolicyBounds::default();
        assert!(bounds.cost_within_ceiling(300_000_000.0));
        assert!(!bounds.cost_within_ceiling(300_000_001.0));
    }

    #[test]
    fn grant_range_is_inclusive() {
        let bounds = PolicyBounds::default();
        assert!(bounds.grant_within_range(60.0));
        assert!(bounds.grant_within_range(80.0));
        assert!(!bounds.grant_within_range(85.0));
        assert!(!bounds.grant_within_range(f64::NAN));
    }
}
