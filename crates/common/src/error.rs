use thiserror::Error;

/// Everything that can go wrong between receiving a signal and the provider acknowledging it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
    #[error("Transport error: {0}")]
    TransportError(String),
}

impl RelayError {
    /// True for errors raised before any outbound call was attempted.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::MalformedRequest(_) | Self::MissingField(_) | Self::InvalidField { .. }
        )
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedRequest(value.to_string())
    }
}
