use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{info, Instrument};
use uuid::Uuid;
use warp::{Rejection, Reply};

use crate::agents::PolicyRagTool;
use crate::error::ApiError;
use crate::metrics::Metrics;
use crate::models::LookupParams;

pub async fn handle_lookup(
    body: Value,
    tool: PolicyRagTool,
    metrics: Arc<Metrics>,
) -> Result<impl Reply, Rejection> {
    let params: LookupParams = serde_json::from_value(body)
        .map_err(|e| warp::reject::custom(ApiError::BadRequest(e.to_string())))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("policy_lookup", %request_id);

    async move {
        info!(
            section_filter = params.section_filter.as_deref().unwrap_or(""),
            top_k = ?params.top_k,
            "Processing policy lookup: {}", params.query
        );

        let started = Instant::now();
        let result = tool.execute(&params).await;
        metrics.record(result.is_error(), started.elapsed().as_secs_f64());

        Ok::<_, Rejection>(warp::reply::json(&result))
    }
    .instrument(span)
    .await
}
