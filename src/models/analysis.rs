use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::errors::VultesterError;
use super::fact::Fact;
use super::rule::Severity;
use super::trace::InferenceStep;

/// Reasoning strategy selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Forward,
    Backward,
    Mixed,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Forward, Method::Backward, Method::Mixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Mixed => "mixed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Forward => "Forward Chaining",
            Self::Backward => "Backward Chaining",
            Self::Mixed => "Mixed Chaining",
        }
    }
}

impl FromStr for Method {
    type Err = VultesterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Method::Forward),
            "backward" => Ok(Method::Backward),
            "mixed" => Ok(Method::Mixed),
            other => Err(VultesterError::UnknownMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall verdict for an analyzed server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Critical,
    Dangerous,
    Warning,
    Acceptable,
}

impl OverallStatus {
    pub fn from_highest(severity: Option<Severity>) -> Self {
        match severity {
            Some(Severity::Critical) => Self::Critical,
            Some(Severity::Dangerous) => Self::Dangerous,
            Some(Severity::Warning) => Self::Warning,
            Some(Severity::Info) | None => Self::Acceptable,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Critical => "Critical vulnerabilities detected! Immediate action required.",
            Self::Dangerous => "Dangerous configuration detected. Action recommended.",
            Self::Warning => "Security warnings found. Review recommended.",
            Self::Acceptable => "Acceptable configuration. Continue monitoring.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Dangerous => "DANGEROUS",
            Self::Warning => "WARNING",
            Self::Acceptable => "ACCEPTABLE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub rule_id: String,
    pub description: String,
    pub consequence: Fact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub rule_id: String,
    pub vulnerability: String,
    pub recommendation: String,
}

/// Fired rules bucketed by severity, each list in firing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityBuckets {
    pub critical: Vec<Vulnerability>,
    pub dangerous: Vec<Vulnerability>,
    pub warning: Vec<Vulnerability>,
    pub info: Vec<Vulnerability>,
}

impl VulnerabilityBuckets {
    pub fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<Vulnerability> {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::Dangerous => &mut self.dangerous,
            Severity::Warning => &mut self.warning,
            Severity::Info => &mut self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.critical.len() + self.dangerous.len() + self.warning.len() + self.info.len()
    }
}

/// The complete outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub method: Method,
    pub method_name: String,
    pub overall_status: OverallStatus,
    pub status_message: String,
    pub vulnerabilities: VulnerabilityBuckets,
    pub total_rules_fired: usize,
    pub fired_rules: Vec<String>,
    pub patches: Vec<Patch>,
    pub inference_trace: Vec<InferenceStep>,
    pub final_facts: Vec<Fact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!("forward".parse::<Method>().unwrap(), Method::Forward);
        assert_eq!("backward".parse::<Method>().unwrap(), Method::Backward);
        assert_eq!("mixed".parse::<Method>().unwrap(), Method::Mixed);
    }

    #[test]
    fn test_method_rejects_unknown() {
        let err = "Forward".parse::<Method>().unwrap_err();
        assert!(matches!(err, VultesterError::UnknownMethod(ref m) if m == "Forward"));
    }

    #[test]
    fn test_method_default_is_forward() {
        assert_eq!(Method::default(), Method::Forward);
    }

    #[test]
    fn test_overall_status_serialization() {
        let json = serde_json::to_string(&OverallStatus::Acceptable).unwrap();
        assert_eq!(json, "\"ACCEPTABLE\"");
    }

    #[test]
    fn test_overall_status_from_highest() {
        assert_eq!(OverallStatus::from_highest(Some(Severity::Critical)), OverallStatus::Critical);
        assert_eq!(OverallStatus::from_highest(Some(Severity::Info)), OverallStatus::Acceptable);
        assert_eq!(OverallStatus::from_highest(None), OverallStatus::Acceptable);
    }

    #[test]
    fn test_buckets_total() {
        let mut buckets = VulnerabilityBuckets::default();
        buckets.bucket_mut(Severity::Warning).push(Vulnerability {
            rule_id: "SSL-07".into(),
            description: "d".into(),
            consequence: Fact::from("hsts_missing"),
        });
        assert_eq!(buckets.total(), 1);
        assert_eq!(buckets.warning.len(), 1);
    }
}
