use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::agents::{PolicyRagTool, TOOL_NAME};
use crate::metrics::Metrics;

mod lookup;
mod tools;

pub fn routes(
    tool: PolicyRagTool,
    metrics: Arc<Metrics>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let api = warp::path("api").and(warp::path("v1")).and(warp::path("tools"));

    let list_route = api
        .and(warp::path::end())
        .and(warp::get())
        .and_then(tools::handle_list_tools);

    let lookup_route = api
        .and(warp::path(TOOL_NAME))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_tool(tool))
        .and(with_metrics(metrics))
        .and_then(lookup::handle_lookup);

    list_route.or(lookup_route)
}

fn with_tool(
    tool: PolicyRagTool,
) -> impl Filter<Extract = (PolicyRagTool,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || tool.clone())
}

fn with_metrics(
    metrics: Arc<Metrics>,
) -> impl Filter<Extract = (Arc<Metrics>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || metrics.clone())
}
