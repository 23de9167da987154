use thiserror::Error;
use warp::{reject::Reject, Rejection, Reply};

/// Failures of the outbound Langflow call. Every variant ends up as the
/// error variant of `AnswerResult`; none crosses the tool boundary.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Retriever request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Retriever returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Retriever response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl Reject for ApiError {}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    let (code, message, details) = if let Some(api_err) = err.find::<ApiError>() {
        match api_err {
            ApiError::BadRequest(_) => (400, "Bad request", api_err.to_string()),
            ApiError::InternalError(_) => (500, "Internal server error", api_err.to_string()),
        }
    } else if let Some(body_err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (400, "Bad request", body_err.to_string())
    } else {
        return Err(err);
    };

    let json = warp::reply::json(&serde_json::json!({
        "error": message,
        "details": details,
    }));
    let status = warp::http::StatusCode::from_u16(code)
        .unwrap_or(warp::http::StatusCode::INTERNAL_SERVER_ERROR);

    Ok(warp::reply::with_status(json, status))
}
