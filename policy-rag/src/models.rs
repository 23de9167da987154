use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Default number of chunks requested from the Retriever.
pub const DEFAULT_TOP_K: i64 = 3;

// Tool invocation models

/// Arguments of a `policy_rag_lookup` call, as sent by the host agent runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupParams {
    pub query: String,
    #[serde(default)]
    pub section_filter: Option<String>,
    #[serde(default)]
    pub top_k: Option<i64>,
}

impl LookupParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            section_filter: None,
            top_k: None,
        }
    }
}

// Retriever wire models

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    pub input_value: String,
    pub output_type: String,
    pub input_type: String,
    pub tweaks: Tweaks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tweaks {
    #[serde(rename = "Retriever")]
    pub retriever: RetrieverTweak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrieverTweak {
    pub top_k: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SectionFilter>,
}

/// Equality constraint on the chunk's `section_number` metadata field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionFilter {
    pub section_number: EqMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EqMatch {
    #[serde(rename = "$eq")]
    pub value: String,
}

// Answer models

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInfo {
    pub content: String,
    pub section_number: String,
    pub section_title: String,
    pub page_number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    pub scores: Vec<f64>,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyAnswer {
    pub query: String,
    pub relevant_sections: Vec<SectionInfo>,
    pub citations: Vec<String>,
    pub confidence: Confidence,
    pub summary: String,
    pub source: String,
}

/// Error variant of a lookup. Serializes with `"error": true` and empty
/// section and citation lists so consumers can branch on the flag.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupFailure {
    pub query: String,
    pub error_message: String,
    pub fallback: String,
}

impl Serialize for LookupFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let empty: [&str; 0] = [];
        let mut state = serializer.serialize_struct("LookupFailure", 6)?;
        state.serialize_field("query", &self.query)?;
        state.serialize_field("error", &true)?;
        state.serialize_field("error_message", &self.error_message)?;
        state.serialize_field("fallback", &self.fallback)?;
        state.serialize_field("relevant_sections", &empty)?;
        state.serialize_field("citations", &empty)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerResult {
    Answer(PolicyAnswer),
    Failure(LookupFailure),
}

impl AnswerResult {
    pub fn is_error(&self) -> bool {
        matches!(self, AnswerResult::Failure(_))
    }

    pub fn query(&self) -> &str {
        match self {
            AnswerResult::Answer(answer) => &answer.query,
            AnswerResult::Failure(failure) => &failure.query,
        }
    }
}
