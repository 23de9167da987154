pub mod formatter;
pub mod retriever;
pub mod summarizer;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::RetrievalError;
use crate::models::{AnswerResult, LookupParams, DEFAULT_TOP_K};
use formatter::ResultFormatter;
use retriever::{build_request, RetrieverAgent};

pub const TOOL_NAME: &str = "policy_rag_lookup";

pub const TOOL_DESCRIPTION: &str = "Search the procurement policy document to find relevant rules, \
     limits, and requirements. Returns policy sections with citations.";

/// Policy lookup tool: request building, retrieval and formatting in one
/// stateless call. Cloning shares the underlying HTTP client.
#[derive(Clone)]
pub struct PolicyRagTool {
    retriever: RetrieverAgent,
}

impl PolicyRagTool {
    pub fn new(retriever: RetrieverAgent) -> Self {
        Self { retriever }
    }

    pub fn from_config(config: &Config) -> Result<Self, RetrievalError> {
        Ok(Self::new(RetrieverAgent::from_config(config)?))
    }

    /// Runs one lookup. Always returns a well-formed answer: retrieval
    /// failures come back as the error variant.
    pub async fn execute(&self, params: &LookupParams) -> AnswerResult {
        let formatter = ResultFormatter::new();
        let payload = build_request(
            &params.query,
            params.section_filter.as_deref(),
            params.top_k,
        );

        match self.retriever.retrieve(&payload).await {
            Ok(raw) => {
                let result = formatter.format(&raw, &params.query);
                if let AnswerResult::Answer(answer) = &result {
                    info!(
                        sections = answer.relevant_sections.len(),
                        average_confidence = answer.confidence.average,
                        "Policy lookup answered"
                    );
                }
                result
            }
            Err(e) => {
                warn!(error = %e, query = %params.query, "Policy lookup failed, returning fallback");
                formatter.format_error(&e, &params.query)
            }
        }
    }
}

/// Parameter schema advertised to the host agent runtime.
pub fn tool_descriptor() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": TOOL_DESCRIPTION,
        "parameters": [
            {
                "name": "query",
                "type": "string",
                "description": "The policy question or compliance check to perform. \
                    Examples: 'equipment limit for interns', \
                    'software approval thresholds', 'prohibited hardware'",
                "required": true
            },
            {
                "name": "section_filter",
                "type": "string",
                "description": "Optional: filter results to a specific policy section. \
                    Examples: '3.2' for Equipment Tiers, '4.1' for Software Approvals",
                "required": false
            },
            {
                "name": "top_k",
                "type": "integer",
                "description": "Number of relevant chunks to retrieve (default: 3)",
                "required": false,
                "default": DEFAULT_TOP_K
            }
        ]
    })
}
