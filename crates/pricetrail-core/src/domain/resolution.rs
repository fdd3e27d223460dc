use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::ValidationError;

/// Retention rule for one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalPolicy {
    /// Minimum spacing between two admitted points.
    pub admission_period: Duration,
    /// Maximum number of points retained per item.
    pub capacity: usize,
    /// Human-readable retention horizon.
    pub description: &'static str,
}

/// Time granularity at which history is independently retained.
///
/// The declaration order is the iteration order: hour, 12-hour, day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1hour")]
    Hour,
    #[serde(rename = "12hour")]
    TwelveHour,
    #[serde(rename = "1day")]
    Day,
}

impl Resolution {
    pub const ALL: [Self; 3] = [Self::Hour, Self::TwelveHour, Self::Day];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "1hour",
            Self::TwelveHour => "12hour",
            Self::Day => "1day",
        }
    }

    pub const fn policy(self) -> IntervalPolicy {
        match self {
            Self::Hour => IntervalPolicy {
                admission_period: Duration::hours(1),
                capacity: 168,
                description: "1 week (hourly)",
            },
            Self::TwelveHour => IntervalPolicy {
                admission_period: Duration::hours(12),
                capacity: 60,
                description: "1 month (every 12 hours)",
            },
            Self::Day => IntervalPolicy {
                admission_period: Duration::days(1),
                capacity: 365,
                description: "1 year (daily)",
            },
        }
    }

    pub const fn admission_period(self) -> Duration {
        self.policy().admission_period
    }

    pub const fn capacity(self) -> usize {
        self.policy().capacity
    }

    pub const fn description(self) -> &'static str {
        self.policy().description
    }

    /// Whether chart labels for this resolution carry a time of day.
    pub const fn labels_include_time(self) -> bool {
        !matches!(self, Self::Day)
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1hour" | "1h" => Ok(Self::Hour),
            "12hour" | "12h" => Ok(Self::TwelveHour),
            "1day" | "1d" => Ok(Self::Day),
            other => Err(ValidationError::InvalidResolution {
                value: other.to_owned(),
            }),
        }
    }
}
