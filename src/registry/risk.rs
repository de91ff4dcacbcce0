use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Probabilities below this are low risk
pub const RISK_THRESHOLD_LOW: f64 = 0.3;
/// Probabilities below this (and at or above the low threshold) are medium risk
pub const RISK_THRESHOLD_MEDIUM: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [RiskCategory::Low, RiskCategory::Medium, RiskCategory::High];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }

    /// Bucket a malignancy probability in `[0, 1]`
    pub fn from_probability(probability: f64) -> Self {
        if probability < RISK_THRESHOLD_LOW {
            RiskCategory::Low
        } else if probability < RISK_THRESHOLD_MEDIUM {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    pub fn color(self) -> RiskColor {
        match self {
            RiskCategory::Low => LOW_RISK_COLOR,
            RiskCategory::Medium => MEDIUM_RISK_COLOR,
            RiskCategory::High => HIGH_RISK_COLOR,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| LookupError::UnknownRiskCategory(s.to_string()))
    }
}

/// Display colors for a risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskColor {
    /// Foreground color, `#rrggbb`
    pub primary: &'static str,
    /// Background color, `#rrggbb`
    pub background: &'static str,
    /// Material Symbols icon name
    pub icon: &'static str,
}

impl RiskColor {
    pub fn as_tuple(&self) -> (&'static str, &'static str, &'static str) {
        (self.primary, self.background, self.icon)
    }

    /// Icon as a Material Symbols span
    pub fn icon_html(&self) -> String {
        format!(
            r#"<span class="material-symbols-rounded" style="vertical-align: middle;">{}</span>"#,
            self.icon
        )
    }
}

pub const LOW_RISK_COLOR: RiskColor = RiskColor {
    primary: "#22c55e",
    background: "#f0fdf4",
    icon: "verified_user",
};

pub const MEDIUM_RISK_COLOR: RiskColor = RiskColor {
    primary: "#f59e0b",
    background: "#fffbeb",
    icon: "gpp_maybe",
};

pub const HIGH_RISK_COLOR: RiskColor = RiskColor {
    primary: "#ef4444",
    background: "#fef2f2",
    icon: "gpp_bad",
};

/// Neutral colors for values that never resolved to a category.
/// Not reachable through [`get_risk_color`].
pub const UNKNOWN_RISK_COLOR: RiskColor = RiskColor {
    primary: "#6b7280",
    background: "#f3f4f6",
    icon: "info",
};

/// Color triple for a risk category name (case-insensitive)
pub fn get_risk_color(risk_category: &str) -> Result<RiskColor, LookupError> {
    risk_category.parse::<RiskCategory>().map(RiskCategory::color)
}
