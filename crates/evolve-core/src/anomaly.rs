//! Anomaly types

use crate::de::null_as_default;
use crate::timestamp::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnomalyStatus {
    Investigating,
    Monitoring,
    Resolved,
    #[default]
    Unset,
    Other(String),
}

impl AnomalyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Investigating => "investigating",
            Self::Monitoring => "monitoring",
            Self::Resolved => "resolved",
            Self::Unset => "",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for AnomalyStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "investigating" => Self::Investigating,
            "monitoring" => Self::Monitoring,
            "resolved" => Self::Resolved,
            "" => Self::Unset,
            _ => Self::Other(value),
        }
    }
}

impl From<AnomalyStatus> for String {
    fn from(value: AnomalyStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AnomalyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: Severity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AnomalyStatus,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Anomaly {
    pub fn is_resolved(&self) -> bool {
        self.status == AnomalyStatus::Resolved
    }

    pub fn is_open(&self) -> bool {
        !self.is_resolved()
    }

    pub fn is_investigating(&self) -> bool {
        self.status == AnomalyStatus::Investigating
    }

    /// Title, or the id when the backend sent none.
    pub fn headline(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.id)
    }

    /// First non-empty of `timestamp`, `resolved_at`, `updated_at`.
    pub fn resolution_timestamp(&self) -> Option<&Timestamp> {
        [&self.timestamp, &self.resolved_at, &self.updated_at]
            .into_iter()
            .flatten()
            .find(|ts| !ts.as_str().is_empty())
    }

    /// Resolved, with a resolution timestamp falling on `day`.
    pub fn resolved_on(&self, day: NaiveDate) -> bool {
        self.is_resolved()
            && self
                .resolution_timestamp()
                .and_then(Timestamp::date)
                .is_some_and(|date| date == day)
    }
}

/// The anomalies endpoint answers either with a bare list or wrapped as
/// `{ "total_alerts": n, "alerts": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnomalyFeed {
    List(Vec<Anomaly>),
    Envelope {
        #[serde(default)]
        total_alerts: Option<u64>,
        alerts: Vec<Anomaly>,
    },
}

impl AnomalyFeed {
    pub fn into_alerts(self) -> Vec<Anomaly> {
        match self {
            Self::List(alerts) | Self::Envelope { alerts, .. } => alerts,
        }
    }
}
