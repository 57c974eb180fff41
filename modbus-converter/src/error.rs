use thiserror::Error;

/// Failure to build a device-bound payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("invalid digits {chunk:?} in chunk {index} of parameter `{key}`")]
    InvalidDigits {
        key: String,
        index: usize,
        chunk: String,
    },

    #[error("no any messages")]
    NoMessages,
}

/// Failure to read a device response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("no any messages")]
    NoMessages,
}

/// Errors returned at the [`crate::core::Converter`] boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse device feature map: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
