use serde::{Deserialize, Serialize};
use super::fact::Fact;

/// Severity of a rule's consequence, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Dangerous,
    Warning,
    Info,
}

impl Severity {
    /// Returns a numeric rank where lower values indicate higher severity.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Dangerous => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Dangerous => "dangerous",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Info rules are tracked but never count as vulnerabilities.
    pub fn is_vulnerability(&self) -> bool {
        !matches!(self, Severity::Info)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping tag for rules and configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ports,
    Ssl,
    Ssh,
    Permissions,
    Software,
    Database,
    Network,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Ports,
        Category::Ssl,
        Category::Ssh,
        Category::Permissions,
        Category::Software,
        Category::Database,
        Category::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ports => "ports",
            Self::Ssl => "ssl",
            Self::Ssh => "ssh",
            Self::Permissions => "permissions",
            Self::Software => "software",
            Self::Database => "database",
            Self::Network => "network",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ports => "Open ports",
            Self::Ssl => "SSL/TLS",
            Self::Ssh => "SSH configuration",
            Self::Permissions => "Permissions",
            Self::Software => "Software",
            Self::Database => "Databases",
            Self::Network => "Network",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ports => "Exposed network ports",
            Self::Ssl => "Transport encryption",
            Self::Ssh => "Secure remote access",
            Self::Permissions => "File system rights",
            Self::Software => "Service versions",
            Self::Database => "Database configuration",
            Self::Network => "Firewall and routing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conjunctive production rule: when every condition holds, the consequence holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub conditions: Vec<Fact>,
    pub consequence: Fact,
    pub severity: Severity,
    pub description: String,
    pub category: Category,
}
