use std::sync::Arc;

use tracing::{error, info};
use warp::Filter;

use policy_rag::agents::PolicyRagTool;
use policy_rag::error::{handle_rejection, ApiError};
use policy_rag::metrics::Metrics;
use policy_rag::{api, config, middleware};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!("Starting SpendGuard Policy RAG tool");
    info!(
        langflow_url = %config.langflow_url,
        flow_id = %config.flow_id,
        timeout_secs = config.retriever_timeout_secs,
        "Configuration loaded"
    );

    let tool = PolicyRagTool::from_config(&config)?;
    let metrics = Arc::new(Metrics::new()?);

    // Build API routes
    let api_routes = api::routes(tool, metrics.clone())
        .with(warp::log("api"))
        .with(middleware::cors(&config.cors_allowed_origins));

    // Health check route
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    // Metrics route
    let metrics_route = warp::path("metrics")
        .and(warp::get())
        .and_then(move || {
            let metrics = metrics.clone();
            async move {
                match metrics.render() {
                    Ok((buffer, content_type)) => Ok(warp::reply::with_header(
                        buffer,
                        "Content-Type",
                        content_type,
                    )),
                    Err(e) => {
                        error!("Failed to encode metrics: {}", e);
                        Err(warp::reject::custom(ApiError::InternalError(e.to_string())))
                    }
                }
            }
        });

    let routes = health
        .or(metrics_route)
        .or(api_routes)
        .recover(handle_rejection);

    // Start server
    let addr = ([0, 0, 0, 0], config.port);
    info!("Server listening on {}", addr.1);

    warp::serve(routes)
        .run(addr)
        .await;

    Ok(())
}
