//! Forecast tables and outbreak alerts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::period::PeriodKey;

/// One period of an externally produced forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: PeriodKey,
    pub observed: Option<f64>,
    pub expected: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    /// Alert flag carried by the table, when it already has one.
    pub alert: Option<bool>,
}

impl ForecastPoint {
    pub fn new(period: PeriodKey) -> Self {
        Self {
            period,
            observed: None,
            expected: None,
            lower: None,
            upper: None,
            alert: None,
        }
    }

    /// True when the observed count exceeds the upper bound.
    pub fn exceeds_upper(&self) -> bool {
        match (self.observed, self.upper) {
            (Some(observed), Some(upper)) => observed > upper,
            _ => false,
        }
    }

    /// The stored alert flag, or the bound comparison when absent.
    pub fn is_alert(&self) -> bool {
        self.alert.unwrap_or_else(|| self.exceeds_upper())
    }
}

/// An observation above the forecast's upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub period: PeriodKey,
    pub observed: f64,
    pub upper: f64,
}

/// Combined hospital/community alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    /// Hospital and community both stable.
    Stable = 1,
    /// Community alert only.
    Watch = 2,
    /// Single hospital alert.
    CautionMinor = 3,
    /// Hospital alert together with a community alert.
    CautionElevated = 4,
    /// Hospital alerts in two consecutive periods.
    Alarm = 5,
}

impl AlertLevel {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertLevel::Stable => "stable",
            AlertLevel::Watch => "watch",
            AlertLevel::CautionMinor => "caution (minor)",
            AlertLevel::CautionElevated => "caution (elevated)",
            AlertLevel::Alarm => "alarm",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AlertLevel::Stable => "hospital and community infections stable",
            AlertLevel::Watch => "community infection risk present",
            AlertLevel::CautionMinor => "one hospital outlier",
            AlertLevel::CautionElevated => "hospital outlier with community infection risk",
            AlertLevel::Alarm => "hospital outliers in two consecutive months",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} ({})", self.value(), self.label())
    }
}
