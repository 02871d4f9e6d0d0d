use thiserror::Error as ThisError;

/// Failure modes of the recommendation pipeline. Any error aborts the
/// current query; there are no retries or partial results.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Malformed input reaching the core: a record with an empty required
    /// field, or an empty corpus at fit time.
    #[error("input error: {0}")]
    Input(String),
    /// Structurally invalid configuration, e.g. non-positive top_n.
    #[error("configuration error: {0}")]
    Config(String),
    /// Degenerate corpus that yields no vocabulary.
    #[error("vectorization error: {0}")]
    Vectorization(String),
}

pub type Result<T> = std::result::Result<T, Error>;
