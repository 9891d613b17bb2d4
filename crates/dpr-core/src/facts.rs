//! Project facts and financial metrics.
//!
//! Both records are produced upstream and only read by the validator. Every field
//! is optional: an absent field is a missing input, and a check that depends on it
//! fails with an explanatory message instead of substituting a default.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scalar facts about the cluster project a DPR describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectFacts {
    /// Industry of the cluster (e.g. "Printing Industry").
    #[serde(default)]
    pub cluster_type: Option<String>,
    /// "City, State" location string.
    #[serde(default)]
    pub location: Option<String>,
    /// Number of member units in the cluster.
    #[serde(default)]
    pub members: Option<u32>,
    /// Total project cost in rupees.
    #[serde(default)]
    pub project_cost: Option<f64>,
    /// Facility the project sets up (e.g. "Digital Printing Equipment").
    #[serde(default)]
    pub facility_type: Option<String>,
    /// Policy scheme the grant is requested under (e.g. "MSE-CDP").
    #[serde(default)]
    pub grant_scheme: Option<String>,
    /// Subsidy range as written in the application (e.g. "60-80%").
    #[serde(default)]
    pub subsidy_range: Option<String>,
}

impl ProjectFacts {
    /// City part of the location (text before the first comma), if any.
    #[must_use]
    pub fn location_city(&self) -> Option<&str> {
        self.location
            .as_deref()
            .and_then(|location| location.split(',').next())
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }

    /// Non-empty cluster type.
    #[must_use]
    pub fn cluster_type(&self) -> Option<&str> {
        non_empty(self.cluster_type.as_deref())
    }

    /// Non-empty facility type.
    #[must_use]
    pub fn facility_type(&self) -> Option<&str> {
        non_empty(self.facility_type.as_deref())
    }

    /// Non-empty grant scheme name.
    #[must_use]
    pub fn grant_scheme(&self) -> Option<&str> {
        non_empty(self.grant_scheme.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Numeric outcomes of the financial model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialMetrics {
    /// Net present value in rupees.
    #[serde(default)]
    pub npv: Option<f64>,
    /// Internal rate of return, percent.
    #[serde(default)]
    pub irr: Option<f64>,
    /// Debt service coverage ratio.
    #[serde(default)]
    pub dscr: Option<f64>,
    /// Break-even capacity utilisation, percent.
    #[serde(default)]
    pub breakeven_pct: Option<f64>,
    /// Payback period in years.
    #[serde(default)]
    pub payback_years: Option<f64>,
    /// Grant share of the project cost, percent.
    #[serde(default)]
    pub grant_percentage: Option<f64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn location_city_takes_first_segment() {
        let facts = ProjectFacts {
            location: Some("Tirupati, Andhra Pradesh".into()),
            ..ProjectFacts::default()
        };
        assert_eq!(facts.location_city(), Some("Tirupati"));
    }

    #[test]
    fn blank_fields_are_missing() {
        let facts = ProjectFacts {
            location: Some(" , AP".into()),
            cluster_type: Some("   ".into()),
            ..ProjectFacts::default()
        };
        assert_eq!(facts.location_city(), None);
        assert_eq!(facts.cluster_type(), None);
        assert_eq!(facts.facility_type(), None);
    }

    #[test]
    fn partial_metrics_deserialize() {
        let metrics: FinancialMetrics = serde_json::from_str(r#"{"dscr": 2.0}"#).unwrap();
        assert_eq!(metrics.dscr, Some(2.0));
        assert_eq!(metrics.npv, None);
        assert_eq!(metrics.grant_percentage, None);
    }
}
