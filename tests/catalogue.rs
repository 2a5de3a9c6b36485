use std::fs;
use std::path::Path;

use vultester::config::load_catalogue;
use vultester::engine::KnowledgeBase;
use vultester::errors::VultesterError;
use vultester::models::{Method, OverallStatus};

const SSH_RULES: &str = r#"
options:
  - { fact: password_auth_enabled, label: "Password authentication", category: ssh }
  - { fact: key_auth_only, label: "Key authentication only", category: ssh }
exclusions:
  password_auth_enabled: [key_auth_only]
rules:
  - id: SSH-01
    category: ssh
    conditions: [password_auth_enabled]
    consequence: password_auth_risk
    severity: warning
    description: Password authentication enabled
remediations:
  SSH-01: Use key-based authentication only
"#;

const NET_RULES: &str = r#"
rules:
  - id: NET-01
    category: network
    conditions: [password_auth_risk, no_firewall_enabled]
    consequence: exposed_password_login
    severity: critical
    description: Password login reachable from anywhere
"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[tokio::test]
async fn test_directory_files_are_merged() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "10-ssh.yaml", SSH_RULES);
    write(dir.path(), "20-net.yaml", NET_RULES);
    write(dir.path(), "notes.txt", "ignored");

    let catalogue = load_catalogue(dir.path()).await.unwrap();
    let ids: Vec<&str> = catalogue.rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["SSH-01", "NET-01"]);
    assert_eq!(catalogue.options.len(), 2);
}

#[tokio::test]
async fn test_merged_catalogue_chains_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "10-ssh.yaml", SSH_RULES);
    write(dir.path(), "20-net.yaml", NET_RULES);

    let kb = KnowledgeBase::load(Some(dir.path())).await.unwrap();
    let engine = vultester::engine::InferenceEngine::new(std::sync::Arc::new(kb));
    let result = engine
        .analyze(&["password_auth_enabled", "no_firewall_enabled"], Method::Backward)
        .unwrap();
    assert_eq!(result.fired_rules, vec!["SSH-01", "NET-01"]);
    assert_eq!(result.overall_status, OverallStatus::Critical);

    let err = engine
        .analyze(&["key_auth_only", "password_auth_enabled"], Method::Forward)
        .unwrap_err();
    assert!(matches!(err, VultesterError::ContradictoryFacts { .. }));
}

#[tokio::test]
async fn test_single_file_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "ssh.yaml", SSH_RULES);

    let path = dir.path().join("ssh.yaml");
    let kb = KnowledgeBase::load(Some(path.as_path())).await.unwrap();
    assert_eq!(kb.rules.len(), 1);
    assert_eq!(kb.recommendation("SSH-01"), Some("Use key-based authentication only"));
}

#[tokio::test]
async fn test_duplicate_rule_id_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.yaml", SSH_RULES);
    write(dir.path(), "b.yaml", &NET_RULES.replace("NET-01", "SSH-01"));

    let err = KnowledgeBase::load(Some(dir.path())).await.unwrap_err();
    assert!(matches!(err, VultesterError::RuleBase(ref m) if m.contains("Duplicate rule id")));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_self_loop_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let looped = NET_RULES.replace(
        "[password_auth_risk, no_firewall_enabled]",
        "[exposed_password_login]",
    );
    write(dir.path(), "loop.yaml", &looped);

    let err = KnowledgeBase::load(Some(dir.path())).await.unwrap_err();
    assert!(matches!(err, VultesterError::RuleBase(ref m) if m.contains("own consequence")));
}

#[tokio::test]
async fn test_remediation_for_missing_rule() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "ssh.yaml", &SSH_RULES.replace("  SSH-01: Use", "  SSH-02: Use"));

    let err = KnowledgeBase::load(Some(dir.path())).await.unwrap_err();
    assert!(matches!(err, VultesterError::RuleBase(ref m) if m.contains("SSH-02")));
}

#[tokio::test]
async fn test_empty_directory_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_catalogue(dir.path()).await.unwrap_err();
    assert!(matches!(err, VultesterError::Config(_)));
}

#[tokio::test]
async fn test_oversized_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut big = String::from("rules: []\n");
    big.push_str(&"# padding\n".repeat(120_000));
    write(dir.path(), "big.yaml", &big);

    let err = load_catalogue(dir.path()).await.unwrap_err();
    assert!(matches!(err, VultesterError::Config(ref m) if m.contains("1MB")));
}

#[tokio::test]
async fn test_cycle_is_loaded_not_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cyclic = r#"
rules:
  - id: NET-01
    category: network
    conditions: [b_fact]
    consequence: a_fact
    severity: warning
    description: a from b
  - id: NET-02
    category: network
    conditions: [a_fact]
    consequence: b_fact
    severity: warning
    description: b from a
"#;
    write(dir.path(), "cycle.yaml", cyclic);

    let kb = KnowledgeBase::load(Some(dir.path())).await.unwrap();
    assert_eq!(kb.rules.dependency_cycles().len(), 1);

    let engine = vultester::engine::InferenceEngine::new(std::sync::Arc::new(kb));
    for method in Method::ALL {
        let result = engine.analyze(&["unrelated"], method).unwrap();
        assert!(result.fired_rules.is_empty());
    }
}
