use thiserror::Error;

/// Top-level error type for the evaluator.
#[derive(Debug, Error)]
pub enum A11yError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid max parallel evaluations value: {0}")]
    InvalidParallelism(usize),

    #[error("failed to load {url}: {message}")]
    PageLoad { url: String, message: String },

    #[error("crawl failed: {0}")]
    Crawl(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
