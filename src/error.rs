use thiserror::Error;

/// Errors produced while compressing or decompressing.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller handed the engine something it cannot encode.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The input does not fit the container's 32-bit frequency fields.
    #[error("input too large: {size} exceeds the maximum of {max}")]
    InputTooLarge { size: usize, max: usize },

    /// The frequency table at the start of an artifact could not be parsed.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The packed payload does not decode against the rebuilt code table.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// The packer produced a bit sequence that is not byte aligned.
    #[error("padding mismatch: {bits} packed bits is not a whole number of bytes")]
    PaddingMismatch { bits: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn malformed_header<S: Into<String>>(msg: S) -> Self {
        Error::MalformedHeader(msg.into())
    }

    pub fn corrupt_payload<S: Into<String>>(msg: S) -> Self {
        Error::CorruptPayload(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
