use serde::{Deserialize, Serialize};
use super::fact::Fact;
use super::rule::Severity;

/// Kind of reasoning event recorded in an inference trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    PhaseStart,
    FactAdded,
    RuleFired,
    GoalCheck,
    Backtrack,
    Fixpoint,
}

/// One immutable entry of the inference trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceStep {
    /// 1-based, strictly increasing within a run.
    pub step: usize,
    pub action: TraceAction,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Fact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<Fact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}
