use std::collections::{HashMap, HashSet};
use crate::errors::VultesterError;
use crate::models::{Category, Fact, Rule};

/// Immutable, ordered collection of rules.
///
/// Authored order is the tie-break whenever several rules become
/// satisfiable at once. Each consequence is concluded by exactly one rule.
#[derive(Debug, Clone)]
pub struct RuleBase {
    rules: Vec<Rule>,
    by_id: HashMap<String, usize>,
    by_consequence: HashMap<Fact, usize>,
}

impl RuleBase {
    pub fn new(rules: Vec<Rule>) -> Result<Self, VultesterError> {
        let mut by_id = HashMap::new();
        let mut by_consequence: HashMap<Fact, usize> = HashMap::new();

        for (idx, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(VultesterError::RuleBase(format!("Rule #{} has an empty id", idx + 1)));
            }
            if rule.consequence.is_empty() {
                return Err(VultesterError::RuleBase(format!(
                    "Rule {} has an empty consequence",
                    rule.id
                )));
            }
            if rule.conditions.contains(&rule.consequence) {
                return Err(VultesterError::RuleBase(format!(
                    "Rule {} lists its own consequence '{}' as a condition",
                    rule.id, rule.consequence
                )));
            }
            if by_id.insert(rule.id.clone(), idx).is_some() {
                return Err(VultesterError::RuleBase(format!("Duplicate rule id: {}", rule.id)));
            }
            if let Some(&prev) = by_consequence.get(&rule.consequence) {
                return Err(VultesterError::RuleBase(format!(
                    "Rules {} and {} both conclude '{}'",
                    rules[prev].id, rule.id, rule.consequence
                )));
            }
            by_consequence.insert(rule.consequence.clone(), idx);
        }

        Ok(Self { rules, by_id, by_consequence })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.by_id.get(id).map(|&i| &self.rules[i])
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().filter(move |r| r.category == category)
    }

    /// The rule whose consequence is `fact`, if any.
    pub fn concluding(&self, fact: &str) -> Option<&Rule> {
        self.by_consequence.get(fact).map(|&i| &self.rules[i])
    }

    /// Every fact mentioned by the rules, as condition or consequence.
    pub fn mentioned_facts(&self) -> HashSet<&Fact> {
        self.rules
            .iter()
            .flat_map(|r| r.conditions.iter().chain(std::iter::once(&r.consequence)))
            .collect()
    }

    /// Finds rule dependency cycles (rule A needs B's consequence, B needs A's ...).
    /// Each cycle is returned as the rule ids along the loop.
    pub fn dependency_cycles(&self) -> Vec<Vec<String>> {
        let mut visited = HashSet::new();
        let mut cycles = Vec::new();

        for start in 0..self.rules.len() {
            if !visited.contains(&start) {
                self.visit(start, &mut visited, &mut cycles);
            }
        }
        cycles
    }

    /// Iterative DFS from `start`; each frame is a rule index and the
    /// position of its next condition.
    fn visit(&self, start: usize, visited: &mut HashSet<usize>, cycles: &mut Vec<Vec<String>>) {
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
        let mut on_path: HashSet<usize> = HashSet::from([start]);

        while let Some((node, next)) = frames.last_mut() {
            let node = *node;
            let conditions = &self.rules[node].conditions;
            if *next == conditions.len() {
                frames.pop();
                on_path.remove(&node);
                visited.insert(node);
                continue;
            }
            let condition = &conditions[*next];
            *next += 1;

            let Some(&dep) = self.by_consequence.get(condition) else {
                continue;
            };
            if on_path.contains(&dep) {
                let pos = frames.iter().position(|&(n, _)| n == dep).unwrap_or(0);
                let ids = frames[pos..].iter().map(|&(i, _)| self.rules[i].id.clone());
                cycles.push(ids.collect());
            } else if !visited.contains(&dep) {
                on_path.insert(dep);
                frames.push((dep, 0));
            }
        }
    }
}
