use thiserror::Error;

/// Raised by a single augmentation operation that cannot process its input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("signal too short: need at least {required} samples, got {actual}")]
    SignalTooShort { required: usize, actual: usize },
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedSampleRate(u32),
    #[error("{0}")]
    Failed(String),
}

impl OperationError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
