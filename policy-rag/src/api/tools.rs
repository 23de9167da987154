use warp::{Rejection, Reply};

use crate::agents::tool_descriptor;

pub async fn handle_list_tools() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&vec![tool_descriptor()]))
}
