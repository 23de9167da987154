//! Policy lookup tool over a Langflow retrieval flow.
//!
//! A lookup builds a Retriever request from the caller's query, posts it to
//! the configured flow and turns the ranked chunks into cited sections,
//! confidence scores and an excerpt summary. Retrieval failures are returned
//! as the error variant of [`models::AnswerResult`], never as a fault.

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod models;

pub use agents::{PolicyRagTool, TOOL_NAME};
pub use models::{AnswerResult, LookupParams};
