// Summarizer Agent: excerpt-based summary of the top-ranked section

use crate::models::SectionInfo;

pub const NO_SECTIONS_SUMMARY: &str = "No relevant policy sections found for this query.";

/// Characters of the first section kept before truncating.
pub const SUMMARY_MAX_CHARS: usize = 500;

pub struct SummarizerAgent;

impl SummarizerAgent {
    pub fn new() -> Self {
        Self
    }

    /// Excerpts the first section in retrieval order. No synthesis across
    /// sections takes place.
    ///
    /// The truncated form reads "Based on {n}:" while the full form reads
    /// "Based on Section {n}:". Both forms are part of the output contract.
    pub fn summarize(&self, sections: &[SectionInfo]) -> String {
        let Some(top) = sections.first() else {
            return NO_SECTIONS_SUMMARY.to_string();
        };

        if top.content.chars().count() > SUMMARY_MAX_CHARS {
            let excerpt: String = top.content.chars().take(SUMMARY_MAX_CHARS).collect();
            format!("Based on {}: {}...", top.section_number, excerpt)
        } else {
            format!("Based on Section {}: {}", top.section_number, top.content)
        }
    }
}

impl Default for SummarizerAgent {
    fn default() -> Self {
        Self::new()
    }
}
