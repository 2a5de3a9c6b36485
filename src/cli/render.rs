use console::style;
use crate::engine::KnowledgeBase;
use crate::models::{
    AnalysisResult, InferenceStep, OverallStatus, Rule, Severity, TraceAction, Vulnerability,
};

pub fn render_severity_badge(severity: Severity) -> String {
    match severity {
        Severity::Critical => style(" CRITICAL ").on_red().white().bold().to_string(),
        Severity::Dangerous => style(" DANGEROUS ").red().bold().to_string(),
        Severity::Warning => style(" WARNING ").yellow().bold().to_string(),
        Severity::Info => style(" INFO ").dim().to_string(),
    }
}

pub fn render_status(status: OverallStatus) -> String {
    let label = format!(" {} ", status.as_str());
    match status {
        OverallStatus::Critical => style(label).on_red().white().bold().to_string(),
        OverallStatus::Dangerous => style(label).red().bold().to_string(),
        OverallStatus::Warning => style(label).yellow().bold().to_string(),
        OverallStatus::Acceptable => style(label).green().bold().to_string(),
    }
}

/// Summary of one analysis: verdict, vulnerabilities by severity, patches.
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {}\n",
        render_status(result.overall_status),
        style(&result.status_message).bold()
    ));
    out.push_str(&format!(
        "{} {} rules fired, {} final facts\n",
        style(&result.method_name).cyan(),
        result.total_rules_fired,
        result.final_facts.len()
    ));

    let buckets = &result.vulnerabilities;
    for (severity, list) in [
        (Severity::Critical, &buckets.critical),
        (Severity::Dangerous, &buckets.dangerous),
        (Severity::Warning, &buckets.warning),
        (Severity::Info, &buckets.info),
    ] {
        if list.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}\n", render_severity_badge(severity)));
        for vuln in list {
            out.push_str(&render_vulnerability(vuln));
        }
    }

    if !result.patches.is_empty() {
        out.push_str(&format!("\n{}\n", style("Recommended patches:").white().bold()));
        for patch in &result.patches {
            out.push_str(&format!(
                "  {:<8} {}\n           {}\n",
                style(&patch.rule_id).cyan().bold(),
                patch.vulnerability,
                style(&patch.recommendation).green()
            ));
        }
    }
    out
}

fn render_vulnerability(vuln: &Vulnerability) -> String {
    format!(
        "  {:<8} {} {}\n",
        style(&vuln.rule_id).bold(),
        vuln.description,
        style(format!("({})", vuln.consequence)).dim()
    )
}

pub fn render_trace(steps: &[InferenceStep]) -> String {
    let mut out = format!("\n{}\n", style("Inference trace:").white().bold());
    for step in steps {
        let marker = match step.action {
            TraceAction::PhaseStart => style("▶").cyan().bold(),
            TraceAction::FactAdded => style("+").green(),
            TraceAction::RuleFired => style("⚡").yellow().bold(),
            TraceAction::GoalCheck => style("?").blue(),
            TraceAction::Backtrack => style("↩").red(),
            TraceAction::Fixpoint => style("■").cyan(),
        };
        out.push_str(&format!("  {:>4} {} {}\n", style(step.step).dim(), marker, step.message));
    }
    out
}

pub fn render_rules(rules: &[&Rule], knowledge: &KnowledgeBase) -> String {
    let mut out = format!("\n{} {}\n\n", style("Rules:").white().bold(), rules.len());
    for rule in rules {
        out.push_str(&format!(
            "  {:<8} {} {}\n",
            style(&rule.id).cyan().bold(),
            render_severity_badge(rule.severity),
            rule.description
        ));
        let conditions: Vec<&str> = rule.conditions.iter().map(|c| c.as_str()).collect();
        out.push_str(&format!(
            "           {} => {}\n",
            style(conditions.join(" & ")).dim(),
            rule.consequence
        ));
        if let Some(text) = knowledge.recommendation(&rule.id) {
            out.push_str(&format!("           {}\n", style(text).green()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::engine::InferenceEngine;
    use crate::models::Method;

    fn analyze(facts: &[&str], method: Method) -> AnalysisResult {
        let engine = InferenceEngine::new(Arc::new(KnowledgeBase::builtin().unwrap()));
        engine.analyze(facts, method).unwrap()
    }

    #[test]
    fn test_render_analysis_lists_vulnerability_and_patch() {
        let result = analyze(&["no_ssl_enabled"], Method::Forward);
        let out = render_analysis(&result);
        assert!(out.contains("CRITICAL"));
        assert!(out.contains("SSL-01"));
        assert!(out.contains("Recommended patches"));
    }

    #[test]
    fn test_render_analysis_acceptable() {
        let result = analyze(&[], Method::Forward);
        let out = render_analysis(&result);
        assert!(out.contains("ACCEPTABLE"));
        assert!(!out.contains("Recommended patches"));
    }

    #[test]
    fn test_render_trace_numbers_steps() {
        let result = analyze(&["port_23_open"], Method::Forward);
        let out = render_trace(&result.inference_trace);
        assert!(out.contains("Inference trace"));
        assert!(out.contains("Fixpoint reached"));
    }

    #[test]
    fn test_severity_badge_text() {
        assert!(render_severity_badge(Severity::Dangerous).contains("DANGEROUS"));
        assert!(render_severity_badge(Severity::Info).contains("INFO"));
    }
}
