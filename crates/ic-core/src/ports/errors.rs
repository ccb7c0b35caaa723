use thiserror::Error;

/// Default user-facing message when a transport error carries nothing useful.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Uniform failure surfaced by every remote call.
///
/// Remote failures never crash the engine; adapters fold every outcome
/// into one of these variants with a message fit to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The request never completed (DNS, timeout, connection loss).
    #[error("{message}")]
    Network { message: String },
}

impl ServiceError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Network {
            message: if message.is_empty() {
                NETWORK_ERROR_MESSAGE.to_string()
            } else {
                message
            },
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. } | Self::Network { message } => message,
        }
    }
}

/// Image acquisition failed for a reason other than user cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AcquisitionError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_falls_back_to_default_message() {
        let err = ServiceError::network("");
        assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_api_error_displays_its_message() {
        let err = ServiceError::api(Some(422), "Invoice not found");
        assert_eq!(err.to_string(), "Invoice not found");
    }
}
