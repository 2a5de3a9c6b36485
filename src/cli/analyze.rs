use std::sync::Arc;
use crate::cli::commands::AnalyzeArgs;
use crate::cli::render;
use crate::engine::{InferenceEngine, KnowledgeBase};
use crate::errors::VultesterError;
use crate::models::Method;

pub async fn handle_analyze(args: AnalyzeArgs) -> Result<(), VultesterError> {
    let method: Method = args.method.parse()?;
    let knowledge = KnowledgeBase::load(args.knowledge.as_deref()).await?;
    let engine = InferenceEngine::new(Arc::new(knowledge));

    let result = engine.analyze(args.facts.as_slice(), method)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print!("{}", render::render_analysis(&result));
    if args.trace {
        print!("{}", render::render_trace(&result.inference_trace));
    }
    Ok(())
}
