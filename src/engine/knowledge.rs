use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::config::{
    load_catalogue, parse_catalogue_str, CatalogueFile, ConfigOption, BUILTIN_CATALOGUE,
};
use crate::errors::VultesterError;
use crate::models::Fact;
use super::exclusion::ExclusionTable;
use super::rulebase::RuleBase;

/// Everything the engine reasons with, validated once at startup and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub rules: RuleBase,
    pub exclusions: ExclusionTable,
    pub remediations: BTreeMap<String, String>,
    pub options: Vec<ConfigOption>,
    known_facts: HashSet<Fact>,
}

impl KnowledgeBase {
    pub fn from_catalogue(catalogue: CatalogueFile) -> Result<Self, VultesterError> {
        let rules = RuleBase::new(catalogue.rules)?;

        for rule_id in catalogue.remediations.keys() {
            if rules.get(rule_id).is_none() {
                return Err(VultesterError::RuleBase(format!(
                    "Remediation registered for unknown rule {}",
                    rule_id
                )));
            }
        }

        for cycle in rules.dependency_cycles() {
            warn!(cycle = %cycle.join(" -> "), "Rule dependency cycle");
        }

        let mut known_facts: HashSet<Fact> = rules.mentioned_facts().into_iter().cloned().collect();
        known_facts.extend(catalogue.options.iter().map(|o| o.fact.clone()));

        let exclusions = ExclusionTable::from_map(catalogue.exclusions);
        info!(
            rules = rules.len(),
            exclusions = exclusions.len(),
            options = catalogue.options.len(),
            remediations = catalogue.remediations.len(),
            "Knowledge base ready"
        );

        Ok(Self {
            rules,
            exclusions,
            remediations: catalogue.remediations,
            options: catalogue.options,
            known_facts,
        })
    }

    /// The catalogue compiled into the binary.
    pub fn builtin() -> Result<Self, VultesterError> {
        Self::from_catalogue(parse_catalogue_str(BUILTIN_CATALOGUE, "built-in catalogue")?)
    }

    /// Loads from `path` when given, otherwise falls back to the built-in catalogue.
    pub async fn load(path: Option<&Path>) -> Result<Self, VultesterError> {
        match path {
            Some(p) => Self::from_catalogue(load_catalogue(p).await?),
            None => Self::builtin(),
        }
    }

    pub fn recommendation(&self, rule_id: &str) -> Option<&str> {
        self.remediations.get(rule_id).map(String::as_str)
    }

    /// Whether any rule or option mentions this fact.
    pub fn is_known_fact(&self, fact: &str) -> bool {
        self.known_facts.contains(fact)
    }
}
