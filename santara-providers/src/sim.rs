use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;

/// Per-provider runtime settings, mapped from configuration.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub name: String,
    /// Simulated backend latency before a response is produced.
    pub response_time: Duration,
    /// Probability in [0, 1] that a request fails with `Unavailable`.
    pub failure_rate: f64,
    /// Location of the backend's JSON document.
    pub data_path: PathBuf,
}

/// Simulated backend transport shared by all adapters: latency, failure
/// injection, and document fetching.
#[derive(Debug)]
pub(crate) struct SimulatedBackend {
    settings: ProviderSettings,
}

impl SimulatedBackend {
    pub(crate) fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    pub(crate) fn name(&self) -> &str {
        &self.settings.name
    }

    pub(crate) fn healthy(&self) -> bool {
        rand::random::<f64>() > self.settings.failure_rate
    }

    /// Sleeps for the configured response time. Cancellation during the
    /// wait surfaces as a timeout, mirroring a connection cut mid-request.
    pub(crate) async fn delay(&self, cancel: &CancellationToken) -> Result<(), ProviderError> {
        if self.settings.response_time.is_zero() {
            return Ok(());
        }
        tokio::select! {
            _ = tokio::time::sleep(self.settings.response_time) => Ok(()),
            _ = cancel.cancelled() => Err(ProviderError::Timeout {
                provider: self.settings.name.clone(),
            }),
        }
    }

    pub(crate) fn inject_failure(&self) -> Result<(), ProviderError> {
        if self.settings.failure_rate > 0.0 && rand::random::<f64>() < self.settings.failure_rate {
            return Err(ProviderError::Unavailable {
                provider: self.settings.name.clone(),
                reason: "simulated failure for testing".to_string(),
            });
        }
        Ok(())
    }

    /// Reads and deserializes the backend document.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        let raw = tokio::fs::read(&self.settings.data_path)
            .await
            .map_err(|err| ProviderError::InvalidResponse {
                provider: self.settings.name.clone(),
                reason: format!(
                    "failed to read {}: {err}",
                    self.settings.data_path.display()
                ),
            })?;
        serde_json::from_slice(&raw).map_err(|err| ProviderError::InvalidResponse {
            provider: self.settings.name.clone(),
            reason: format!("failed to decode document: {err}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(failure_rate: f64, response_time: Duration) -> ProviderSettings {
        ProviderSettings {
            name: "Test".to_string(),
            response_time,
            failure_rate,
            data_path: PathBuf::from("/nonexistent.json"),
        }
    }

    #[tokio::test]
    async fn zero_failure_rate_never_fails() {
        let backend = SimulatedBackend::new(settings(0.0, Duration::ZERO));
        for _ in 0..100 {
            assert!(backend.inject_failure().is_ok());
        }
    }

    #[tokio::test]
    async fn certain_failure_rate_always_fails() {
        let backend = SimulatedBackend::new(settings(1.0, Duration::ZERO));
        assert!(matches!(
            backend.inject_failure(),
            Err(ProviderError::Unavailable { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_delay_is_a_timeout() {
        let backend = SimulatedBackend::new(settings(0.0, Duration::from_secs(10)));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = backend.delay(&cancel).await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn missing_document_is_an_invalid_response() {
        let backend = SimulatedBackend::new(settings(0.0, Duration::ZERO));
        let result: Result<serde_json::Value, _> = backend.fetch().await;
        assert!(matches!(
            result,
            Err(ProviderError::InvalidResponse { .. })
        ));
    }
}
