use thiserror::Error;

/// Request-layer rejection; rejected text never reaches the extractor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejected {
    #[error("text is too short: {len} character(s), minimum is {min}")]
    TooShort { len: usize, min: usize },

    #[error("text is too long: {len} character(s), maximum is {max}")]
    TooLong { len: usize, max: usize },

    #[error("text contains no letters or digits")]
    NoAlphanumeric,
}

/// Failure of the optional language-model bridge
///
/// Always absorbed by falling back to the deterministic pipeline.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(String),

    #[error("response error: {0}")]
    Response(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("llm call timed out after {0}s")]
    Timeout(u64),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
