// Result Formatter: turns raw Langflow output into a cited, scored answer

use std::fmt::Display;

use serde_json::Value;

use super::summarizer::SummarizerAgent;
use crate::models::{AnswerResult, Confidence, LookupFailure, PolicyAnswer, SectionInfo};

pub const POLICY_SOURCE: &str = "ACME Corp Procurement Policy v2.1";

pub const FALLBACK_MESSAGE: &str = "Unable to retrieve policy information dynamically. \
     Please consult the policy document directly or contact \
     procurement@acme.corp for assistance.";

pub const UNKNOWN_SECTION: &str = "Unknown";

pub struct ResultFormatter {
    summarizer: SummarizerAgent,
}

impl ResultFormatter {
    pub fn new() -> Self {
        Self {
            summarizer: SummarizerAgent::new(),
        }
    }

    /// Formats a successful Retriever response. Never fails: any shape
    /// deviation degrades to defaults or to an empty section list.
    pub fn format(&self, raw: &Value, query: &str) -> AnswerResult {
        let result = first_output(raw);
        let chunks = list_at(result, "chunks");
        let metadata = list_at(result, "metadata");

        let mut relevant_sections = Vec::with_capacity(chunks.len());
        let mut citations = Vec::with_capacity(chunks.len());
        let mut scores = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let section = section_info(chunk, metadata.get(i));
            citations.push(citation(&section));
            scores.push(
                chunk
                    .get("similarity_score")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            );
            relevant_sections.push(section);
        }

        let summary = self.summarizer.summarize(&relevant_sections);
        let average = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        AnswerResult::Answer(PolicyAnswer {
            query: query.to_string(),
            relevant_sections,
            citations,
            confidence: Confidence { scores, average },
            summary,
            source: POLICY_SOURCE.to_string(),
        })
    }

    pub fn format_error(&self, error: &dyn Display, query: &str) -> AnswerResult {
        AnswerResult::Failure(LookupFailure {
            query: query.to_string(),
            error_message: error.to_string(),
            fallback: FALLBACK_MESSAGE.to_string(),
        })
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// `outputs[0].outputs[0]`, if every level is present.
fn first_output(raw: &Value) -> Option<&Value> {
    raw.get("outputs")?
        .as_array()?
        .first()?
        .get("outputs")?
        .as_array()?
        .first()
}

fn list_at<'a>(result: Option<&'a Value>, key: &str) -> &'a [Value] {
    result
        .and_then(|r| r.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn section_info(chunk: &Value, meta: Option<&Value>) -> SectionInfo {
    let field = |key: &str| meta.and_then(|m| m.get(key));

    SectionInfo {
        content: chunk
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        section_number: field("section_number")
            .and_then(scalar_text)
            .unwrap_or_else(|| UNKNOWN_SECTION.to_string()),
        section_title: field("section_title")
            .and_then(scalar_text)
            .unwrap_or_default(),
        page_number: field("page_number").and_then(page_number).unwrap_or(0),
    }
}

/// Strings as-is; numbers and booleans in their JSON text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integers, integral floats (`7.0`) and numeric strings (`"7"`).
fn page_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn citation(section: &SectionInfo) -> String {
    if section.section_title.is_empty() {
        format!("Section {}", section.section_number)
    } else {
        format!("Section {} ({})", section.section_number, section.section_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn langflow(chunks: Value, metadata: Value) -> Value {
        json!({"outputs": [{"outputs": [{"chunks": chunks, "metadata": metadata}]}]})
    }

    fn answer(result: AnswerResult) -> PolicyAnswer {
        match result {
            AnswerResult::Answer(answer) => answer,
            AnswerResult::Failure(failure) => panic!("unexpected failure: {failure:?}"),
        }
    }

    #[test]
    fn preserves_rank_order_across_all_lists() {
        let raw = langflow(
            json!([
                {"text": "Interns: $1,500 equipment cap", "similarity_score": 0.62},
                {"text": "Managers: $4,000", "similarity_score": 0.91},
                {"text": "Gaming hardware is prohibited", "similarity_score": 0.4},
            ]),
            json!([
                {"section_number": "3.2", "section_title": "Equipment Tiers", "page_number": 7},
                {"section_number": "3.3", "section_title": "", "page_number": 8},
                {"section_number": "5.1", "section_title": "Prohibited Items", "page_number": 12},
            ]),
        );

        let answer = answer(ResultFormatter::new().format(&raw, "equipment limit for interns"));

        assert_eq!(answer.relevant_sections.len(), 3);
        assert_eq!(
            answer.citations,
            vec![
                "Section 3.2 (Equipment Tiers)",
                "Section 3.3",
                "Section 5.1 (Prohibited Items)",
            ]
        );
        assert_eq!(answer.confidence.scores, vec![0.62, 0.91, 0.4]);
        assert!((answer.confidence.average - (0.62 + 0.91 + 0.4) / 3.0).abs() < 1e-12);
        assert_eq!(answer.relevant_sections[1].page_number, 8);
        assert_eq!(
            answer.summary,
            "Based on Section 3.2: Interns: $1,500 equipment cap"
        );
        assert_eq!(answer.source, "ACME Corp Procurement Policy v2.1");
    }

    #[test]
    fn missing_metadata_entry_gets_defaults() {
        let raw = langflow(
            json!([
                {"text": "a", "similarity_score": 0.5},
                {"text": "b", "similarity_score": 0.5},
            ]),
            json!([{"section_number": "1.1", "section_title": "Scope", "page_number": 1}]),
        );

        let answer = answer(ResultFormatter::new().format(&raw, "q"));
        let second = &answer.relevant_sections[1];

        assert_eq!(second.section_number, "Unknown");
        assert_eq!(second.section_title, "");
        assert_eq!(second.page_number, 0);
        assert_eq!(answer.citations[1], "Section Unknown");
    }

    #[test]
    fn partial_metadata_and_scores_get_defaults() {
        let raw = langflow(
            json!([{"text": "a"}, {"similarity_score": 0.8}]),
            json!([{"section_title": "Scope"}, {"section_number": 4.1, "page_number": "n/a"}]),
        );

        let answer = answer(ResultFormatter::new().format(&raw, "q"));

        assert_eq!(answer.relevant_sections[0].section_number, "Unknown");
        assert_eq!(answer.citations[0], "Section Unknown (Scope)");
        assert_eq!(answer.relevant_sections[1].content, "");
        assert_eq!(answer.relevant_sections[1].section_number, "4.1");
        assert_eq!(answer.relevant_sections[1].page_number, 0);
        assert_eq!(answer.confidence.scores, vec![0.0, 0.8]);
    }

    #[test]
    fn present_values_of_other_types_pass_through() {
        let raw = langflow(
            json!([{"text": "a"}, {"text": "b"}, {"text": "c"}]),
            json!([
                {"section_number": "3.2", "section_title": 7, "page_number": 7.0},
                {"section_number": 5, "section_title": "Vendors", "page_number": "12"},
                {"section_number": null, "section_title": ["x"], "page_number": 2.5},
            ]),
        );

        let answer = answer(ResultFormatter::new().format(&raw, "q"));
        let sections = &answer.relevant_sections;

        assert_eq!(sections[0].section_title, "7");
        assert_eq!(sections[0].page_number, 7);
        assert_eq!(answer.citations[0], "Section 3.2 (7)");
        assert_eq!(sections[1].section_number, "5");
        assert_eq!(sections[1].page_number, 12);
        assert_eq!(answer.citations[1], "Section 5 (Vendors)");
        assert_eq!(sections[2].section_number, "Unknown");
        assert_eq!(sections[2].section_title, "");
        assert_eq!(sections[2].page_number, 0);
        assert_eq!(answer.citations[2], "Section Unknown");
    }

    #[test]
    fn empty_chunks_yield_empty_answer() {
        let answer = answer(ResultFormatter::new().format(&langflow(json!([]), json!([])), "q"));

        assert!(answer.relevant_sections.is_empty());
        assert!(answer.citations.is_empty());
        assert_eq!(answer.confidence.average, 0.0);
        assert_eq!(answer.summary, "No relevant policy sections found for this query.");
    }

    #[test]
    fn malformed_shapes_degrade_to_empty() {
        let formatter = ResultFormatter::new();
        for raw in [
            json!({}),
            json!({"outputs": []}),
            json!({"outputs": [{}]}),
            json!({"outputs": [{"outputs": "nope"}]}),
            json!({"outputs": [{"outputs": [{"chunks": {"text": "x"}}]}]}),
            json!([1, 2, 3]),
            Value::Null,
        ] {
            let answer = answer(formatter.format(&raw, "q"));
            assert!(answer.relevant_sections.is_empty(), "raw: {raw}");
            assert_eq!(answer.confidence.average, 0.0);
        }
    }

    #[test]
    fn long_first_section_is_truncated_in_summary() {
        let text = "x".repeat(501);
        let raw = langflow(
            json!([{"text": text, "similarity_score": 0.7}]),
            json!([{"section_number": "4.1", "section_title": "Software Approvals", "page_number": 9}]),
        );

        let answer = answer(ResultFormatter::new().format(&raw, "q"));
        assert_eq!(answer.summary, format!("Based on 4.1: {}...", "x".repeat(500)));
        assert_eq!(answer.relevant_sections[0].content.len(), 501);
    }

    #[test]
    fn error_variant_carries_message_and_fallback() {
        let result = ResultFormatter::new().format_error(&"connection refused", "gaming equipment?");

        match result {
            AnswerResult::Failure(failure) => {
                assert_eq!(failure.query, "gaming equipment?");
                assert_eq!(failure.error_message, "connection refused");
                assert!(failure.fallback.contains("procurement@acme.corp"));
            }
            AnswerResult::Answer(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn citation_with_and_without_title() {
        let mut section = SectionInfo {
            content: String::new(),
            section_number: "3.2".into(),
            section_title: "Equipment Tiers".into(),
            page_number: 0,
        };
        assert_eq!(citation(&section), "Section 3.2 (Equipment Tiers)");
        section.section_title.clear();
        assert_eq!(citation(&section), "Section 3.2");
    }
}
