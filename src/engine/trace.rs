use crate::models::{InferenceStep, Rule, TraceAction};

/// Append-only log of reasoning events with 1-based step numbers.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    steps: Vec<InferenceStep>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: TraceAction, message: impl Into<String>) -> usize {
        self.push(action, message.into(), None)
    }

    /// Records an event about a specific rule, attaching its id, conditions,
    /// consequence and severity.
    pub fn record_rule(
        &mut self,
        action: TraceAction,
        message: impl Into<String>,
        rule: &Rule,
    ) -> usize {
        self.push(action, message.into(), Some(rule))
    }

    fn push(&mut self, action: TraceAction, message: String, rule: Option<&Rule>) -> usize {
        let step = self.steps.len() + 1;
        self.steps.push(InferenceStep {
            step,
            action,
            message,
            rule_id: rule.map(|r| r.id.clone()),
            conditions: rule.map(|r| r.conditions.clone()),
            consequence: rule.map(|r| r.consequence.clone()),
            severity: rule.map(|r| r.severity),
        });
        step
    }

    pub fn steps(&self) -> &[InferenceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<InferenceStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Fact, Severity};

    #[test]
    fn test_steps_are_one_based_and_contiguous() {
        let mut trace = TraceRecorder::new();
        assert_eq!(trace.record(TraceAction::PhaseStart, "start"), 1);
        assert_eq!(trace.record(TraceAction::FactAdded, "fact"), 2);
        assert_eq!(trace.record(TraceAction::Fixpoint, "done"), 3);
        let numbers: Vec<usize> = trace.steps().iter().map(|s| s.step).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_rule_step_carries_rule_fields() {
        let rule = Rule {
            id: "SSL-01".into(),
            conditions: vec![Fact::from("no_ssl_enabled")],
            consequence: Fact::from("no_ssl_vulnerability"),
            severity: Severity::Critical,
            description: "No SSL".into(),
            category: Category::Ssl,
        };
        let mut trace = TraceRecorder::new();
        trace.record_rule(TraceAction::RuleFired, "fired", &rule);
        let step = &trace.steps()[0];
        assert_eq!(step.rule_id.as_deref(), Some("SSL-01"));
        assert_eq!(step.severity, Some(Severity::Critical));
        assert_eq!(step.consequence.as_ref().map(Fact::as_str), Some("no_ssl_vulnerability"));
    }

    #[test]
    fn test_plain_step_omits_rule_fields_in_json() {
        let mut trace = TraceRecorder::new();
        trace.record(TraceAction::PhaseStart, "start");
        let json = serde_json::to_value(&trace.into_steps()[0]).unwrap();
        assert_eq!(json["action"], "phase_start");
        assert!(json.get("rule_id").is_none());
    }
}
