// Retriever Agent: builds the Langflow run request and performs the call

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::RetrievalError;
use crate::models::{
    EqMatch, RequestPayload, RetrieverTweak, SectionFilter, Tweaks, DEFAULT_TOP_K,
};

/// Translates a lookup into the Langflow run payload.
///
/// The query goes through verbatim. `top_k` defaults to 3 and is otherwise
/// passed along unchecked. A section filter becomes an equality constraint on
/// `section_number`; an absent or empty filter leaves the key out entirely.
pub fn build_request(query: &str, section_filter: Option<&str>, top_k: Option<i64>) -> RequestPayload {
    let filter = section_filter
        .filter(|section| !section.is_empty())
        .map(|section| SectionFilter {
            section_number: EqMatch {
                value: section.to_string(),
            },
        });

    RequestPayload {
        input_value: query.to_string(),
        output_type: "chat".to_string(),
        input_type: "chat".to_string(),
        tweaks: Tweaks {
            retriever: RetrieverTweak {
                top_k: top_k.unwrap_or(DEFAULT_TOP_K),
                filter,
            },
        },
    }
}

#[derive(Clone)]
pub struct RetrieverAgent {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl RetrieverAgent {
    pub fn new(langflow_url: &str, flow_id: &str, timeout_secs: u64) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/v1/run/{}", langflow_url.trim_end_matches('/'), flow_id),
            timeout_secs,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RetrievalError> {
        Self::new(&config.langflow_url, &config.flow_id, config.retriever_timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts the payload and returns the raw response body. Shape checks are
    /// left to the formatter; only transport, status and JSON decoding fail here.
    pub async fn retrieve(&self, payload: &RequestPayload) -> Result<Value, RetrievalError> {
        info!(
            endpoint = %self.endpoint,
            top_k = payload.tweaks.retriever.top_k,
            filtered = payload.tweaks.retriever.filter.is_some(),
            "Retriever: Searching for: {}", payload.input_value
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RetrievalError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| self.classify(e))?;
        let raw: Value = serde_json::from_slice(&bytes)?;
        debug!(bytes = bytes.len(), "Retriever: response received");

        Ok(raw)
    }

    fn classify(&self, err: reqwest::Error) -> RetrievalError {
        if err.is_timeout() {
            RetrievalError::Timeout(self.timeout_secs)
        } else {
            RetrievalError::HttpError(err)
        }
    }
}
