use serde_json::json;
use crate::cli::commands::RulesArgs;
use crate::cli::render;
use crate::engine::KnowledgeBase;
use crate::errors::VultesterError;
use crate::models::{Category, Rule};

pub async fn handle_rules(args: RulesArgs) -> Result<(), VultesterError> {
    let knowledge = KnowledgeBase::load(args.knowledge.as_deref()).await?;

    let rules: Vec<&Rule> = match args.category.as_deref() {
        Some(name) => {
            let category = Category::parse(name)
                .ok_or_else(|| VultesterError::NotFound(format!("Unknown category '{}'", name)))?;
            knowledge.rules.by_category(category).collect()
        }
        None => knowledge.rules.iter().collect(),
    };

    if args.json {
        let body = json!({ "total_rules": rules.len(), "rules": rules });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", render::render_rules(&rules, &knowledge));
    }
    Ok(())
}
