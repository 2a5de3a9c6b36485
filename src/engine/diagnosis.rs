use std::collections::BTreeMap;
use crate::errors::VultesterError;
use crate::models::{OverallStatus, Patch, Severity, Vulnerability, VulnerabilityBuckets};
use super::rulebase::RuleBase;

/// Severity buckets, overall verdict and patch list for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub overall_status: OverallStatus,
    pub vulnerabilities: VulnerabilityBuckets,
    pub patches: Vec<Patch>,
}

pub struct DiagnosisAggregator<'a> {
    rules: &'a RuleBase,
    remediations: &'a BTreeMap<String, String>,
}

impl<'a> DiagnosisAggregator<'a> {
    pub fn new(rules: &'a RuleBase, remediations: &'a BTreeMap<String, String>) -> Self {
        Self { rules, remediations }
    }

    /// Buckets the fired rules by severity (each bucket in firing order) and
    /// collects one patch per fired non-info rule that has a remediation.
    pub fn aggregate(&self, fired: &[String]) -> Result<Diagnosis, VultesterError> {
        let mut vulnerabilities = VulnerabilityBuckets::default();
        let mut patches = Vec::new();
        let mut highest: Option<Severity> = None;

        for id in fired {
            let rule = self.rules.get(id).ok_or_else(|| {
                VultesterError::InvariantViolation(format!(
                    "fired rule {} is not in the rule base",
                    id
                ))
            })?;

            vulnerabilities.bucket_mut(rule.severity).push(Vulnerability {
                rule_id: rule.id.clone(),
                description: rule.description.clone(),
                consequence: rule.consequence.clone(),
            });

            if rule.severity.is_vulnerability()
                && highest.map_or(true, |h| rule.severity.rank() < h.rank())
            {
                highest = Some(rule.severity);
            }

            if !rule.severity.is_vulnerability() {
                continue;
            }
            if let Some(text) = self.remediations.get(&rule.id) {
                patches.push(Patch {
                    rule_id: rule.id.clone(),
                    vulnerability: rule.description.clone(),
                    recommendation: text.clone(),
                });
            }
        }

        Ok(Diagnosis {
            overall_status: OverallStatus::from_highest(highest),
            vulnerabilities,
            patches,
        })
    }
}
