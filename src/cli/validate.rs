use console::style;
use crate::cli::commands::ValidateArgs;
use crate::config::load_catalogue;
use crate::engine::KnowledgeBase;
use crate::errors::VultesterError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), VultesterError> {
    let catalogue = load_catalogue(&args.path).await?;
    let knowledge = KnowledgeBase::from_catalogue(catalogue)?;

    println!("{} Catalogue is valid: {}", style("✓").green(), args.path.display());
    println!("  rules:         {}", knowledge.rules.len());
    println!("  options:       {}", knowledge.options.len());
    println!("  exclusions:    {}", knowledge.exclusions.len());
    println!("  remediations:  {}", knowledge.remediations.len());

    let cycles = knowledge.rules.dependency_cycles();
    if cycles.is_empty() {
        println!("  cycles:        none");
    } else {
        for cycle in cycles {
            println!("  {} cycle: {}", style("!").yellow().bold(), cycle.join(" -> "));
        }
    }
    Ok(())
}
