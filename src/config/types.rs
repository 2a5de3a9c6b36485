use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::errors::VultesterError;
use crate::models::{Category, Fact, Rule};

/// One knowledge catalogue document, as authored in YAML.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogueFile {
    #[serde(default)]
    pub options: Vec<ConfigOption>,
    #[serde(default)]
    pub exclusions: BTreeMap<Fact, Vec<Fact>>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Recommendation text keyed by rule id.
    #[serde(default)]
    pub remediations: BTreeMap<String, String>,
}

/// A selectable fact offered to clients, grouped by category.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfigOption {
    pub fact: Fact,
    pub label: String,
    pub category: Category,
}

impl CatalogueFile {
    /// Appends another document. Rules and options keep file order; exclusion
    /// lists are unioned; a rule id may only be given one remediation.
    pub fn merge(&mut self, other: CatalogueFile) -> Result<(), VultesterError> {
        self.options.extend(other.options);
        self.rules.extend(other.rules);

        for (fact, excluded) in other.exclusions {
            let entry = self.exclusions.entry(fact).or_default();
            for e in excluded {
                if !entry.contains(&e) {
                    entry.push(e);
                }
            }
        }

        for (rule_id, text) in other.remediations {
            if self.remediations.contains_key(&rule_id) {
                return Err(VultesterError::RuleBase(format!(
                    "Remediation for {} is defined more than once",
                    rule_id
                )));
            }
            self.remediations.insert(rule_id, text);
        }
        Ok(())
    }
}
