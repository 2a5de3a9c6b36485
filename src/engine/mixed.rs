use std::collections::HashSet;
use crate::errors::VultesterError;
use crate::models::{Rule, TraceAction};
use super::backward::BackwardChainer;
use super::facts::FactSet;
use super::forward::ForwardChainer;
use super::rulebase::RuleBase;
use super::trace::TraceRecorder;

/// Forward saturation followed by a backward pass over the rules forward
/// chaining left unfired.
pub struct MixedChainer<'a> {
    rules: &'a RuleBase,
}

impl<'a> MixedChainer<'a> {
    pub fn new(rules: &'a RuleBase) -> Self {
        Self { rules }
    }

    pub fn run(
        &self,
        facts: &mut FactSet,
        trace: &mut TraceRecorder,
    ) -> Result<Vec<String>, VultesterError> {
        let mut fired = ForwardChainer::new(self.rules).run(facts, trace);

        let already: HashSet<&str> = fired.iter().map(String::as_str).collect();
        let remaining: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|r| !already.contains(r.id.as_str()))
            .collect();

        trace.record(
            TraceAction::PhaseStart,
            format!(
                "Backward phase started: verifying {} rules not fired by forward chaining",
                remaining.len()
            ),
        );
        let backward = BackwardChainer::new(self.rules).prove_goals(remaining, facts, trace)?;

        for id in backward {
            if !fired.contains(&id) {
                fired.push(id);
            }
        }
        Ok(fired)
    }
}
