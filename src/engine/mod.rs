pub mod backward;
pub mod diagnosis;
pub mod exclusion;
pub mod facts;
pub mod forward;
pub mod knowledge;
pub mod mixed;
pub mod rulebase;
pub mod trace;

pub use backward::BackwardChainer;
pub use diagnosis::{Diagnosis, DiagnosisAggregator};
pub use exclusion::{ExclusionTable, ExclusionValidator};
pub use facts::FactSet;
pub use forward::ForwardChainer;
pub use knowledge::KnowledgeBase;
pub use mixed::MixedChainer;
pub use rulebase::RuleBase;
pub use trace::TraceRecorder;

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::VultesterError;
use crate::models::{AnalysisResult, Fact, Method};

/// Runs analyses against a shared, read-only knowledge base.
///
/// Each call owns its own fact set and trace, so one engine can serve
/// concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    knowledge: Arc<KnowledgeBase>,
}

impl InferenceEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Validates the submitted facts, chains with `method` and aggregates the
    /// outcome. Either the whole result is produced or an error is returned.
    pub fn analyze<S: AsRef<str>>(
        &self,
        facts: &[S],
        method: Method,
    ) -> Result<AnalysisResult, VultesterError> {
        let run_id = Uuid::new_v4();
        let kb = self.knowledge.as_ref();
        let submitted: Vec<Fact> =
            facts.iter().map(|f| Fact::from(AsRef::<str>::as_ref(f))).collect();

        ExclusionValidator::new(&kb.exclusions).validate(&submitted)?;

        for fact in &submitted {
            if !kb.is_known_fact(fact.as_str()) {
                debug!(%run_id, fact = %fact, "Fact not referenced by any rule");
            }
        }

        let mut working = FactSet::from_facts(submitted);
        let mut trace = TraceRecorder::new();
        debug!(%run_id, %method, facts = working.len(), "Starting analysis");

        let fired = match method {
            Method::Forward => ForwardChainer::new(&kb.rules).run(&mut working, &mut trace),
            Method::Backward => BackwardChainer::new(&kb.rules).run(&mut working, &mut trace)?,
            Method::Mixed => MixedChainer::new(&kb.rules).run(&mut working, &mut trace)?,
        };

        let diagnosis = DiagnosisAggregator::new(&kb.rules, &kb.remediations).aggregate(&fired)?;

        info!(
            %run_id,
            %method,
            fired = fired.len(),
            status = diagnosis.overall_status.as_str(),
            trace_steps = trace.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            method,
            method_name: method.display_name().to_string(),
            overall_status: diagnosis.overall_status,
            status_message: diagnosis.overall_status.message().to_string(),
            vulnerabilities: diagnosis.vulnerabilities,
            total_rules_fired: fired.len(),
            fired_rules: fired,
            patches: diagnosis.patches,
            inference_trace: trace.into_steps(),
            final_facts: working.into_vec(),
        })
    }
}
