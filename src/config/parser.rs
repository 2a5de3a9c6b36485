use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::errors::VultesterError;
use super::schema::CATALOGUE_SCHEMA;
use super::types::CatalogueFile;

/// Catalogue compiled into the binary, used when no `--knowledge` path is given.
pub const BUILTIN_CATALOGUE: &str = include_str!("../../knowledge/server_security.yaml");

const MAX_CATALOGUE_BYTES: u64 = 1_048_576;

static FACT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*$").expect("fact pattern is valid")
});

static RULE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]+-[0-9]+$").expect("rule id pattern is valid")
});

/// Load a catalogue from a single YAML file, or from every `*.yaml` file in a
/// directory (merged in file-name order).
pub async fn load_catalogue(path: &Path) -> Result<CatalogueFile, VultesterError> {
    if !path.exists() {
        return Err(VultesterError::Config(format!(
            "Knowledge catalogue not found: {}",
            path.display()
        )));
    }

    let files = if path.is_dir() {
        catalogue_files(path)?
    } else {
        vec![path.to_path_buf()]
    };
    if files.is_empty() {
        return Err(VultesterError::Config(format!(
            "No *.yaml catalogue files in {}",
            path.display()
        )));
    }

    let mut merged = CatalogueFile::default();
    for file in &files {
        let metadata = tokio::fs::metadata(file).await?;
        if metadata.len() > MAX_CATALOGUE_BYTES {
            return Err(VultesterError::Config(format!(
                "Catalogue file {} exceeds 1MB limit",
                file.display()
            )));
        }

        let content = tokio::fs::read_to_string(file).await?;
        let part = parse_catalogue_str(&content, &file.display().to_string())?;
        info!(
            file = %file.display(),
            rules = part.rules.len(),
            options = part.options.len(),
            "Loaded catalogue file"
        );
        merged.merge(part)?;
    }

    Ok(merged)
}

fn catalogue_files(dir: &Path) -> Result<Vec<PathBuf>, VultesterError> {
    let pattern = dir.join("*.yaml");
    let pattern_str = pattern.to_string_lossy();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern_str)
        .map_err(|e| VultesterError::Config(format!("Invalid glob pattern: {}", e)))?
    {
        files.push(entry.map_err(|e| VultesterError::Config(format!("Glob error: {}", e)))?);
    }
    files.sort();
    Ok(files)
}

/// Parse and validate one catalogue document. `origin` names the source in errors.
pub fn parse_catalogue_str(content: &str, origin: &str) -> Result<CatalogueFile, VultesterError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| VultesterError::RuleBase(format!("{}: invalid YAML: {}", origin, e)))?;

    validate_schema(&yaml, origin)?;

    let catalogue: CatalogueFile = serde_yaml::from_value(yaml)
        .map_err(|e| VultesterError::RuleBase(format!("{}: {}", origin, e)))?;

    validate_identifiers(&catalogue, origin)?;
    debug!(origin, rules = catalogue.rules.len(), "Catalogue document validated");

    Ok(catalogue)
}

/// Validate a document against the catalogue JSON schema.
fn validate_schema(yaml: &serde_yaml::Value, origin: &str) -> Result<(), VultesterError> {
    let json_value = serde_json::to_value(yaml).map_err(|e| {
        VultesterError::RuleBase(format!("{}: catalogue conversion error: {}", origin, e))
    })?;

    let compiled = jsonschema::JSONSchema::compile(&CATALOGUE_SCHEMA)
        .map_err(|e| VultesterError::Internal(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        if !messages.is_empty() {
            return Err(VultesterError::RuleBase(format!(
                "{}: schema validation failed: {}",
                origin,
                messages.join("; ")
            )));
        }
    }

    Ok(())
}

/// Reject identifiers that would not round-trip through URLs and CLI arguments.
/// Empty consequences are left for `RuleBase` to report.
fn validate_identifiers(catalogue: &CatalogueFile, origin: &str) -> Result<(), VultesterError> {
    let bad_fact = |fact: &str, context: String| {
        VultesterError::RuleBase(format!(
            "{}: invalid fact name '{}' in {} (expected lowercase snake_case)",
            origin, fact, context
        ))
    };

    for rule in &catalogue.rules {
        if !RULE_ID_PATTERN.is_match(&rule.id) {
            return Err(VultesterError::RuleBase(format!(
                "{}: invalid rule id '{}' (expected e.g. SSH-01)",
                origin, rule.id
            )));
        }
        for condition in &rule.conditions {
            if !FACT_PATTERN.is_match(condition.as_str()) {
                return Err(bad_fact(condition.as_str(), format!("conditions of {}", rule.id)));
            }
        }
        if !rule.consequence.is_empty() && !FACT_PATTERN.is_match(rule.consequence.as_str()) {
            return Err(bad_fact(rule.consequence.as_str(), format!("consequence of {}", rule.id)));
        }
    }

    for option in &catalogue.options {
        if !FACT_PATTERN.is_match(option.fact.as_str()) {
            return Err(bad_fact(option.fact.as_str(), "options".to_string()));
        }
    }

    for (fact, excluded) in &catalogue.exclusions {
        for f in std::iter::once(fact).chain(excluded.iter()) {
            if !FACT_PATTERN.is_match(f.as_str()) {
                return Err(bad_fact(f.as_str(), "exclusions".to_string()));
            }
        }
    }

    for rule_id in catalogue.remediations.keys() {
        if !RULE_ID_PATTERN.is_match(rule_id) {
            return Err(VultesterError::RuleBase(format!(
                "{}: invalid remediation key '{}' (expected a rule id)",
                origin, rule_id
            )));
        }
    }

    Ok(())
}
