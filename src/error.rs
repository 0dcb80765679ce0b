use thiserror::Error;

/// Failures surfaced by the normalization and query engine.
///
/// Malformed per-row data is never an error here; it is recovered while
/// normalizing (see [`crate::data::normalize`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Raw source unreadable or not in the expected schema.
    #[error("failed to load source data: {0}")]
    SourceLoad(String),

    /// A caller-supplied filter value could not be interpreted.
    #[error("invalid value {value:?} for parameter `{param}`: {reason}")]
    InvalidArgument {
        param: &'static str,
        value: String,
        reason: String,
    },

    /// The worker running an engine call panicked or was cancelled.
    #[error("engine task failed: {0}")]
    Task(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
