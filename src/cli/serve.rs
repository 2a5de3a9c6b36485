use crate::cli::commands::ServeArgs;
use crate::engine::KnowledgeBase;
use crate::errors::VultesterError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), VultesterError> {
    info!(host = %args.host, port = args.port, "Starting API server");

    let knowledge = KnowledgeBase::load(args.knowledge.as_deref()).await?;
    let state = api::create_app_state(knowledge);
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| VultesterError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
