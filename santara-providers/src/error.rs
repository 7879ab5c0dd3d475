use thiserror::Error;

/// Error taxonomy shared by all provider adapters.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider}: provider request timeout")]
    Timeout { provider: String },

    #[error("{provider}: provider unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("{provider}: invalid response from provider: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("no flights found")]
    NoFlights,
}

impl ProviderError {
    /// An empty result set is a valid answer; everything else may be
    /// transient and is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::NoFlights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flights_is_the_only_non_retryable_kind() {
        assert!(!ProviderError::NoFlights.is_retryable());
        assert!(ProviderError::Timeout {
            provider: "x".into()
        }
        .is_retryable());
        assert!(ProviderError::Unavailable {
            provider: "x".into(),
            reason: "down".into()
        }
        .is_retryable());
        assert!(ProviderError::InvalidResponse {
            provider: "x".into(),
            reason: "bad json".into()
        }
        .is_retryable());
    }
}
