use tracing::debug;
use crate::models::{Rule, TraceAction};
use super::facts::FactSet;
use super::rulebase::RuleBase;
use super::trace::TraceRecorder;

/// Data-driven saturation.
///
/// Each pass collects every rule whose conditions hold against the facts as
/// they stood at the start of the pass, then fires them in authored order.
/// Passes repeat until one fires nothing.
pub struct ForwardChainer<'a> {
    rules: &'a RuleBase,
}

impl<'a> ForwardChainer<'a> {
    pub fn new(rules: &'a RuleBase) -> Self {
        Self { rules }
    }

    /// Saturates `facts` and returns the fired rule ids in firing order.
    pub fn run(&self, facts: &mut FactSet, trace: &mut TraceRecorder) -> Vec<String> {
        trace.record(
            TraceAction::PhaseStart,
            format!("Forward chaining started with {} initial facts", facts.len()),
        );
        for fact in facts.iter() {
            trace.record(TraceAction::FactAdded, format!("Initial fact: {}", fact));
        }

        let mut fired = Vec::new();
        let mut pass = 0;
        loop {
            pass += 1;
            let eligible: Vec<&Rule> = self
                .rules
                .iter()
                .filter(|r| Self::is_eligible(r, facts))
                .collect();
            if eligible.is_empty() {
                break;
            }

            debug!(pass, eligible = eligible.len(), "Forward pass");
            for rule in eligible {
                facts.insert(rule.consequence.clone());
                fired.push(rule.id.clone());
                trace.record_rule(
                    TraceAction::RuleFired,
                    format!("Pass {}: rule {} fired: {}", pass, rule.id, rule.description),
                    rule,
                );
                trace.record(TraceAction::FactAdded, format!("New fact: {}", rule.consequence));
            }
        }

        trace.record(
            TraceAction::Fixpoint,
            format!("Fixpoint reached after {} passes: {} rules fired", pass, fired.len()),
        );
        fired
    }

    /// A rule is eligible when its consequence is not yet known and every
    /// condition is.
    fn is_eligible(rule: &Rule, facts: &FactSet) -> bool {
        !facts.contains(rule.consequence.as_str()) && facts.contains_all(&rule.conditions)
    }
}
