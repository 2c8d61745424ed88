//! Statistic and range-filter enumerations

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Summary statistics that can be accumulated over a sample stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Arithmetic mean
    Mean,
    /// Exact median (buffers every accepted sample)
    Median,
    /// Remedian estimate of the median (bounded memory)
    ApproxMedian,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Difference between maximum and minimum
    Range,
    /// Sample standard deviation
    Sdev,
    /// Sum of values
    Sum,
    /// Sample variance
    Variance,
}

impl Statistic {
    /// All statistics, in declaration order
    pub const ALL: [Statistic; 9] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::ApproxMedian,
        Statistic::Min,
        Statistic::Max,
        Statistic::Range,
        Statistic::Sdev,
        Statistic::Sum,
        Statistic::Variance,
    ];

    /// Get the name of this statistic
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::ApproxMedian => "approx_median",
            Self::Min => "min",
            Self::Max => "max",
            Self::Range => "range",
            Self::Sdev => "sdev",
            Self::Sum => "sum",
            Self::Variance => "variance",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Mean => "arithmetic mean",
            Self::Median => "exact median",
            Self::ApproxMedian => "approximate median (remedian)",
            Self::Min => "minimum",
            Self::Max => "maximum",
            Self::Range => "range (max - min)",
            Self::Sdev => "sample standard deviation",
            Self::Sum => "sum",
            Self::Variance => "sample variance",
        }
    }

    /// Whether the statistic is computed in constant memory
    ///
    /// Only the exact median needs to keep every accepted sample.
    pub fn supports_incremental(&self) -> bool {
        !matches!(self, Self::Median)
    }

    /// Minimum number of accepted samples for a defined (non-NaN) value
    pub fn min_samples(&self) -> u64 {
        match self {
            Self::Sdev | Self::Variance => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Statistic::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == normalized)
            .or(match normalized.as_str() {
                "std" | "stddev" | "std_dev" => Some(Self::Sdev),
                "var" => Some(Self::Variance),
                "remedian" => Some(Self::ApproxMedian),
                _ => None,
            })
            .ok_or_else(|| Error::InvalidParameter(format!("unknown statistic '{s}'")))
    }
}

/// How data ranges filter samples
///
/// A processor's ranges type starts out `Undefined` and is fixed by the first
/// range added to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangesType {
    /// Accept only samples inside at least one range
    Include,
    /// Reject samples inside any range
    Exclude,
    /// No data ranges configured; accept everything
    #[default]
    Undefined,
}

impl RangesType {
    /// Get the name of this ranges type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for RangesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangesType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            "undefined" => Ok(Self::Undefined),
            other => Err(Error::InvalidParameter(format!("unknown ranges type '{other}'"))),
        }
    }
}
