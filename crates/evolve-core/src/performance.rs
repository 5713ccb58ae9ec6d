//! Performance metric series
//!
//! A series' current value is its last point. When a series has no points the
//! dashboard shows a fixed placeholder instead, and [`Reading`] records which
//! of the two it is so placeholders are never mistaken for live telemetry.

use crate::de::null_as_default;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSeries {
    Accuracy,
    Latency,
    Stability,
    Efficiency,
}

impl MetricSeries {
    pub const ALL: [MetricSeries; 4] = [
        Self::Accuracy,
        Self::Latency,
        Self::Stability,
        Self::Efficiency,
    ];

    /// Value displayed when the series has no data points.
    pub fn placeholder(&self) -> f64 {
        match self {
            Self::Accuracy => 96.0,
            Self::Latency => 120.0,
            Self::Stability => 97.0,
            Self::Efficiency => 88.0,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Latency => "ms",
            _ => "%",
        }
    }
}

impl fmt::Display for MetricSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accuracy => "accuracy",
            Self::Latency => "latency",
            Self::Stability => "stability",
            Self::Efficiency => "efficiency",
        };
        f.write_str(name)
    }
}

/// A point-in-time value that is either measured or a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub placeholder: bool,
}

impl Reading {
    pub fn measured(value: f64) -> Self {
        Self {
            value,
            placeholder: false,
        }
    }

    pub fn placeholder(series: MetricSeries) -> Self {
        Self {
            value: series.placeholder(),
            placeholder: true,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.placeholder
    }

    pub fn rounded(&self) -> Self {
        Self {
            value: self.value.round(),
            placeholder: self.placeholder,
        }
    }
}

/// Response of `GET /performance/metrics`. Null or missing series are empty.
/// Latency arrives as `latency_ms` or, from older backends, `latency`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub accuracy: Vec<MetricPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<Vec<MetricPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<Vec<MetricPoint>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stability: Vec<MetricPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub efficiency: Vec<MetricPoint>,
}

impl PerformanceMetrics {
    pub fn series(&self, series: MetricSeries) -> &[MetricPoint] {
        match series {
            MetricSeries::Accuracy => &self.accuracy,
            MetricSeries::Latency => self
                .latency_ms
                .as_deref()
                .or(self.latency.as_deref())
                .unwrap_or_default(),
            MetricSeries::Stability => &self.stability,
            MetricSeries::Efficiency => &self.efficiency,
        }
    }

    /// Last point of the series, or its placeholder.
    pub fn latest(&self, series: MetricSeries) -> Reading {
        latest_reading(Some(self), series)
    }
}

/// Latest reading for a series when the metrics themselves may be missing.
pub fn latest_reading(metrics: Option<&PerformanceMetrics>, series: MetricSeries) -> Reading {
    metrics
        .and_then(|metrics| metrics.series(series).last())
        .map(|point| Reading::measured(point.value))
        .unwrap_or_else(|| Reading::placeholder(series))
}

/// Response of `GET /performance/system`; the backend does not fix its keys.
pub type SystemPerformance = serde_json::Map<String, serde_json::Value>;
