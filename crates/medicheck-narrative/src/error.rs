//! Error types for the narrative service

use thiserror::Error;

/// Errors that can occur while producing a narrative analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NarrativeError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The reply contained no usable JSON object
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// The JSON object lacks a required top-level key
    #[error("Response is missing required key '{0}'")]
    MissingKey(&'static str),

    /// Model call exceeded its time budget
    #[error("Model call timed out")]
    Timeout,

    /// Blank drug name passed to a single-drug query
    #[error("Drug name must not be empty")]
    EmptyDrugName,
}
