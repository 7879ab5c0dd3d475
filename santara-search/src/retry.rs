use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Bounded exponential backoff parameters.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("{label}: cancelled")]
    Cancelled { label: String },

    #[error("{label}: failed after {attempts} attempts: {error}")]
    Exhausted {
        label: String,
        attempts: u32,
        error: E,
    },

    /// The operation reported an error the classifier deemed not worth
    /// retrying; it is returned as-is.
    #[error("{0}")]
    Aborted(E),
}

/// Runs `op` up to `policy.max_attempts` times with exponential backoff.
///
/// The cancellation token is checked before every attempt and during every
/// backoff wait. `is_retryable` classifies each failure; a non-retryable
/// error aborts immediately.
pub async fn retry_with_check<T, E, F, Fut, C>(
    cancel: &CancellationToken,
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
    is_retryable: C,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    C: Fn(&E) -> bool,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1u32;

    loop {
        if cancel.is_cancelled() {
            return Err(RetryError::Cancelled {
                label: label.to_string(),
            });
        }

        let error = match op().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(
                        %label,
                        attempt,
                        max_attempts = policy.max_attempts,
                        "succeeded after retry"
                    );
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        if !is_retryable(&error) {
            tracing::debug!(%label, attempt, %error, "non-retryable error");
            return Err(RetryError::Aborted(error));
        }

        if attempt >= policy.max_attempts {
            tracing::warn!(
                %label,
                attempts = attempt,
                %error,
                "giving up after final attempt"
            );
            return Err(RetryError::Exhausted {
                label: label.to_string(),
                attempts: attempt,
                error,
            });
        }

        tracing::warn!(
            %label,
            attempt,
            max_attempts = policy.max_attempts,
            %error,
            delay = ?delay,
            "attempt failed, retrying"
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(RetryError::Cancelled {
                    label: label.to_string(),
                });
            }
            _ = tokio::time::sleep(delay) => {}
        }

        delay = delay.mul_f64(policy.multiplier).min(policy.max_delay);
        attempt += 1;
    }
}
