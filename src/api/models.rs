use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub facts: Vec<String>,
    pub method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RulesQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    /// Comma-separated facts already chosen in the wizard.
    pub selected: Option<String>,
}
