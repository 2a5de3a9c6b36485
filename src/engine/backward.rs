use std::collections::{HashMap, HashSet};
use tracing::debug;
use crate::errors::VultesterError;
use crate::models::{Fact, Rule, TraceAction};
use super::facts::FactSet;
use super::rulebase::RuleBase;
use super::trace::TraceRecorder;

/// Goal-driven proof search.
///
/// Every rule consequence is taken as a goal in authored order. A goal holds
/// if it is already a fact, or if the rule concluding it has all of its
/// conditions provable. Proven rules fire in post-order (premises first).
pub struct BackwardChainer<'a> {
    rules: &'a RuleBase,
}

impl<'a> BackwardChainer<'a> {
    pub fn new(rules: &'a RuleBase) -> Self {
        Self { rules }
    }

    /// Attempts every rule and returns the fired rule ids in firing order.
    pub fn run(
        &self,
        facts: &mut FactSet,
        trace: &mut TraceRecorder,
    ) -> Result<Vec<String>, VultesterError> {
        trace.record(
            TraceAction::PhaseStart,
            format!(
                "Backward chaining started: {} goals to check against {} facts",
                self.rules.len(),
                facts.len()
            ),
        );
        self.prove_goals(self.rules.iter(), facts, trace)
    }

    /// Attempts the given rules as goals, sharing one proof memo across them.
    pub fn prove_goals<'r, I>(
        &self,
        goals: I,
        facts: &mut FactSet,
        trace: &mut TraceRecorder,
    ) -> Result<Vec<String>, VultesterError>
    where
        I: IntoIterator<Item = &'r Rule>,
    {
        let mut session = ProofSession::new(self.rules, facts, trace);
        for rule in goals {
            session.prove_rule(rule)?;
        }
        Ok(session.fired)
    }
}

struct ProofSession<'a> {
    rules: &'a RuleBase,
    facts: &'a mut FactSet,
    trace: &'a mut TraceRecorder,
    /// Goals already decided in this run. Proven goals are also in `facts`.
    memo: HashMap<Fact, bool>,
    in_progress: Vec<Fact>,
    on_stack: HashSet<Fact>,
    fired: Vec<String>,
    fired_ids: HashSet<String>,
}

/// Outcome of looking at a goal before descending into its conditions.
enum Lookup<'a> {
    Decided(bool),
    Expand(&'a Rule),
}

/// A rule under proof and the index of its next unchecked condition.
struct Frame<'a> {
    rule: &'a Rule,
    next: usize,
}

impl<'a> ProofSession<'a> {
    fn new(rules: &'a RuleBase, facts: &'a mut FactSet, trace: &'a mut TraceRecorder) -> Self {
        Self {
            rules,
            facts,
            trace,
            memo: HashMap::new(),
            in_progress: Vec::new(),
            on_stack: HashSet::new(),
            fired: Vec::new(),
            fired_ids: HashSet::new(),
        }
    }

    fn prove_rule(&mut self, rule: &Rule) -> Result<(), VultesterError> {
        if self.fired_ids.contains(&rule.id) {
            return Ok(());
        }
        if self.facts.contains(rule.consequence.as_str()) {
            self.trace.record_rule(
                TraceAction::GoalCheck,
                format!("Goal {} is already a fact, rule {} not needed", rule.consequence, rule.id),
                rule,
            );
            return Ok(());
        }
        self.prove(&rule.consequence)?;
        Ok(())
    }

    /// Depth-first proof of `goal` on an explicit frame stack, so chain
    /// length is bounded by heap rather than by the thread's stack.
    fn prove(&mut self, goal: &Fact) -> Result<bool, VultesterError> {
        let rule = match self.lookup(goal)? {
            Lookup::Decided(known) => return Ok(known),
            Lookup::Expand(rule) => rule,
        };
        self.push_goal(goal);
        let mut frames = vec![Frame { rule, next: 0 }];
        let mut outcome = false;
        // Verdict of the condition most recently checked by the top frame.
        let mut child: Option<bool> = None;

        while let Some(frame) = frames.last_mut() {
            let rule = frame.rule;
            let finished = match child.take() {
                Some(false) => {
                    let condition = &rule.conditions[frame.next - 1];
                    self.trace.record_rule(
                        TraceAction::Backtrack,
                        format!(
                            "Rule {} abandoned: condition {} not established",
                            rule.id, condition
                        ),
                        rule,
                    );
                    Some(false)
                }
                _ if frame.next == rule.conditions.len() => Some(true),
                _ => None,
            };

            if let Some(proved) = finished {
                frames.pop();
                self.pop_goal();
                if proved {
                    self.fire(rule);
                }
                self.memo.insert(rule.consequence.clone(), proved);
                outcome = proved;
                child = Some(proved);
                continue;
            }

            let condition = &rule.conditions[frame.next];
            frame.next += 1;
            match self.lookup(condition)? {
                Lookup::Decided(known) => child = Some(known),
                Lookup::Expand(next) => {
                    self.push_goal(condition);
                    frames.push(Frame { rule: next, next: 0 });
                }
            }
        }
        Ok(outcome)
    }

    /// Settles `goal` without descending when it is a fact, memoized, on the
    /// current proof path, or concluded by no rule.
    fn lookup(&mut self, goal: &Fact) -> Result<Lookup<'a>, VultesterError> {
        if self.facts.contains(goal.as_str()) {
            self.trace.record(TraceAction::GoalCheck, format!("Goal {}: known fact", goal));
            return Ok(Lookup::Decided(true));
        }
        if let Some(&known) = self.memo.get(goal) {
            let verdict = if known { "proved" } else { "not provable" };
            self.trace
                .record(TraceAction::GoalCheck, format!("Goal {}: already {}", goal, verdict));
            return Ok(Lookup::Decided(known));
        }
        if self.on_stack.contains(goal) {
            let pos = self.in_progress.iter().position(|f| f == goal).unwrap_or(0);
            let path: Vec<&str> = self.in_progress[pos..]
                .iter()
                .chain(std::iter::once(goal))
                .map(Fact::as_str)
                .collect();
            debug!(goal = %goal, "Cycle cut during backward proof");
            self.trace.record(
                TraceAction::Backtrack,
                format!("Cycle detected ({}), abandoning this path", path.join(" -> ")),
            );
            return Ok(Lookup::Decided(false));
        }

        let rules = self.rules;
        let Some(rule) = rules.concluding(goal.as_str()) else {
            self.trace.record(
                TraceAction::GoalCheck,
                format!("Goal {}: not observed and no rule concludes it", goal),
            );
            self.memo.insert(goal.clone(), false);
            return Ok(Lookup::Decided(false));
        };

        // Every goal on the stack has its own rule, so the stack can never
        // hold more goals than there are rules.
        if self.in_progress.len() >= rules.len() {
            return Err(VultesterError::InvariantViolation(format!(
                "proof depth exceeded {} while proving '{}'",
                rules.len(),
                goal
            )));
        }

        self.trace.record_rule(
            TraceAction::GoalCheck,
            format!(
                "Goal {}: trying rule {} ({} conditions)",
                goal,
                rule.id,
                rule.conditions.len()
            ),
            rule,
        );
        Ok(Lookup::Expand(rule))
    }

    fn push_goal(&mut self, goal: &Fact) {
        self.on_stack.insert(goal.clone());
        self.in_progress.push(goal.clone());
    }

    fn pop_goal(&mut self) {
        if let Some(goal) = self.in_progress.pop() {
            self.on_stack.remove(&goal);
        }
    }

    fn fire(&mut self, rule: &Rule) {
        if !self.fired_ids.insert(rule.id.clone()) {
            return;
        }
        self.facts.insert(rule.consequence.clone());
        self.fired.push(rule.id.clone());
        debug!(rule = %rule.id, "Rule proved");
        self.trace.record_rule(
            TraceAction::RuleFired,
            format!("Rule {} proved: {}", rule.id, rule.description),
            rule,
        );
    }
}
