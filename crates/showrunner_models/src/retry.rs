//! Bounded retry for transient model failures.

use async_trait::async_trait;
use showrunner_core::{GenerateRequest, GenerateResponse, RetrySettings};
use showrunner_error::{RetryableError, ShowrunnerError, ShowrunnerErrorKind, ShowrunnerResult};
use showrunner_interface::ModelDriver;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{instrument, warn};

/// Wraps a driver and retries transient failures with exponential backoff.
///
/// Only model errors that report themselves retryable (timeouts, dropped
/// connections, 408/429/5xx) are retried. Everything else, including
/// malformed replies, is returned on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryingDriver<D> {
    inner: D,
    settings: RetrySettings,
}

impl<D: ModelDriver> RetryingDriver<D> {
    /// Wrap `inner` with the given retry policy.
    pub fn new(inner: D, settings: RetrySettings) -> Self {
        Self { inner, settings }
    }

    /// The wrapped driver.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// The retry policy.
    pub fn settings(&self) -> &RetrySettings {
        &self.settings
    }
}

fn is_transient(error: &ShowrunnerError) -> bool {
    match error.kind() {
        ShowrunnerErrorKind::Model(e) => e.is_retryable(),
        _ => false,
    }
}

#[async_trait]
impl<D: ModelDriver> ModelDriver for RetryingDriver<D> {
    #[instrument(
        skip(self, req),
        fields(
            provider = self.inner.provider_name(),
            max_retries = *self.settings.max_retries()
        )
    )]
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse> {
        if !self.settings.is_enabled() {
            return self.inner.generate(req).await;
        }

        let strategy = ExponentialBackoff::from_millis(*self.settings.initial_backoff_ms())
            .factor(2)
            .max_delay(Duration::from_secs(*self.settings.max_delay_secs()))
            .map(jitter)
            .take(*self.settings.max_retries());

        let inner = &self.inner;
        let mut attempt = 0usize;

        Retry::spawn(strategy, || {
            attempt += 1;
            let current = attempt;
            async move {
                match inner.generate(req).await {
                    Ok(response) => Ok(response),
                    Err(e) if is_transient(&e) => {
                        warn!(attempt = current, error = %e, "Transient model failure, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::Permanent(e)),
                }
            }
        })
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
