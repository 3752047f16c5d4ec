use crate::utils::error::BigPandaError;
use crate::utils::timeparse::epoch_seconds;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Status of an OIM alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Ok,
    Critical,
    Warning,
    Acknowledged,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Acknowledged => "acknowledged",
        }
    }
}

impl FromStr for AlertStatus {
    type Err = BigPandaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "critical" => Ok(Self::Critical),
            "warning" => Ok(Self::Warning),
            "acknowledged" => Ok(Self::Acknowledged),
            other => Err(BigPandaError::InvalidArgument {
                message: format!(
                    "Status must be one of 'ok', 'critical', 'warning', 'acknowledged', got '{other}'"
                ),
            }),
        }
    }
}

/// Body of an OIM alert. Each property is flattened into the JSON object and
/// becomes a tag on the alert at BigPanda.
#[derive(Debug, Clone, Serialize)]
pub struct OimAlert {
    pub app_key: String,
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, String>,
}

/// When a maintenance plan ends: at an absolute time, or a delta after its
/// start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEnd {
    At(DateTime<Utc>),
    After(Duration),
}

/// Maintenance window. `start` defaults to the moment the plan is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSchedule {
    pub start: Option<DateTime<Utc>>,
    pub end: PlanEnd,
}

impl PlanSchedule {
    /// Resolves the window against `now` into rounded epoch seconds.
    pub fn resolve(&self, now: DateTime<Utc>) -> (i64, i64) {
        let start = self.start.unwrap_or(now);
        let end = match self.end {
            PlanEnd::At(t) => t,
            PlanEnd::After(delta) => start + delta,
        };
        (epoch_seconds(start), epoch_seconds(end))
    }
}

/// Wire body for creating a maintenance plan.
#[derive(Debug, Clone, Serialize)]
pub struct NewMaintenancePlan {
    pub name: String,
    pub condition: serde_json::Value,
    pub start: i64,
    pub end: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A maintenance plan as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenancePlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub condition: serde_json::Value,
    pub start: i64,
    pub end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Wire body for creating a mapping enrichment schema.
#[derive(Debug, Clone, Serialize)]
pub struct MappingSchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub active: bool,
    pub when: String,
    pub config: MappingConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct MappingConfig {
    pub name: String,
    pub fields: Vec<MappingField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MappingField {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_existing: Option<bool>,
}

impl MappingSchema {
    /// Schema with one query tag looking up one result tag, the shape the
    /// Alert Enrichment v2.1 API expects.
    pub fn new(query_tag: &str, result_tag: &str, enrichment_name: &str) -> Self {
        Self {
            kind: "mapping".to_string(),
            active: true,
            when: "discard != true".to_string(),
            config: MappingConfig {
                name: enrichment_name.to_string(),
                fields: vec![
                    MappingField {
                        title: query_tag.to_string(),
                        kind: "query_tag".to_string(),
                        override_existing: None,
                    },
                    MappingField {
                        title: result_tag.to_string(),
                        kind: "result_tag".to_string(),
                        override_existing: Some(true),
                    },
                ],
            },
        }
    }
}

/// One entry of the mapping enrichment listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingEnrichment {
    pub id: String,
    pub config: MappingEnrichmentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingEnrichmentConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MappingList {
    pub data: Vec<MappingEnrichment>,
}

/// Response of a mapping table upload.
#[derive(Debug, Deserialize)]
pub struct UploadJob {
    #[serde(default)]
    pub job_id: Option<String>,
}

/// State of an enrichment upload job. Only `done` and `failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Done,
    Failed,
    InProgress,
    Pending,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct JobStatus {
    pub status: JobState,
}
