//! Errors raised while collecting answers

use thiserror::Error;

/// Failure modes of the answer collector
#[derive(Debug, Error)]
pub enum CollectError {
    /// Neither a git repository nor a clean install was chosen
    #[error("Sorry, a git project is required or you can choose to run a clean Drupal install.")]
    NoSource,

    /// A question finished without an answer the step could read
    #[error("No answer available for `{0}`")]
    Unanswered(&'static str),

    /// An answer had the wrong shape or named a choice that was never offered
    #[error("Invalid answer for `{question}`: {detail}")]
    InvalidAnswer {
        question: &'static str,
        detail: String,
    },

    /// The terminal prompt itself failed (closed stdin, interrupted, ...)
    #[error("Prompt failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CollectError {
    pub(crate) fn invalid(question: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            question,
            detail: detail.into(),
        }
    }
}
