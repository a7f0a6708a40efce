use core::time::Duration;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::metrics::Metrics;
use crate::vote::Round;
use crate::Value;

// Error variants related to metrics.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("timeout after {0:?} when {1}")]
    Timeout(Duration, String),

    #[error("learner is shutting down")]
    ShuttingDown,
}

/// Wait is a wrapper of Metrics channel that impls several utils to wait
/// for metrics to satisfy some condition.
pub struct Wait<V: Value> {
    pub timeout: Duration,
    pub rx: watch::Receiver<Metrics<V>>,
}

impl<V> Wait<V>
where V: Value
{
    /// Wait for metrics to satisfy some condition or timeout.
    #[tracing::instrument(level = "trace", skip(self, func), fields(msg=%msg.to_string()))]
    pub async fn metrics<T>(
        &self,
        func: T,
        msg: impl ToString,
    ) -> Result<Metrics<V>, WaitError>
    where
        T: Fn(&Metrics<V>) -> bool + Send,
    {
        let timeout_at = Instant::now() + self.timeout;

        let mut rx = self.rx.clone();
        loop {
            let latest = rx.borrow().clone();

            tracing::debug!(
                "id={} wait {:} latest: {}",
                latest.id,
                msg.to_string(),
                latest
            );

            if func(&latest) {
                tracing::debug!(
                    "id={} done wait {:} latest: {}",
                    latest.id,
                    msg.to_string(),
                    latest
                );
                return Ok(latest);
            }

            let now = Instant::now();
            if now >= timeout_at {
                return Err(WaitError::Timeout(
                    self.timeout,
                    format!("{} latest: {}", msg.to_string(), latest),
                ));
            }

            let sleep_time = timeout_at - now;
            tracing::debug!(?sleep_time, "wait timeout");
            let delay = tokio::time::sleep(sleep_time);

            futures::select_biased! {
                _ = delay.fuse() => {
                    tracing::debug!( "id={} timeout wait {:} latest: {}", latest.id, msg.to_string(), latest );
                    return Err(WaitError::Timeout(self.timeout, format!("{} latest: {}", msg.to_string(), latest)));
                }
                changed = rx.changed().fuse() => {
                    match changed {
                        Ok(_) => {
                            // metrics changed, continue the waiting loop
                        },
                        Err(err) => {
                            tracing::debug!(
                                "id={} error: {:?}; wait {:} latest: {}",
                                latest.id,
                                err,
                                msg.to_string(),
                                latest
                            );

                            return Err(WaitError::ShuttingDown);
                        }
                    }
                }
            };
        }
    }

    /// Wait until at least `n` votes are handled or timeout.
    ///
    /// A value decided by one of these votes has been sent to the
    /// decided-value channel when this returns.
    #[tracing::instrument(level = "trace", skip(self), fields(msg=msg.to_string().as_str()))]
    pub async fn processed(
        &self,
        n: u64,
        msg: impl ToString,
    ) -> Result<Metrics<V>, WaitError> {
        self.metrics(
            |m| m.processed >= n,
            &format!("{} .processed >= {}", msg.to_string(), n),
        )
        .await
    }

    /// Wait for the tallied round to become `want` or timeout.
    #[tracing::instrument(level = "trace", skip(self), fields(msg=msg.to_string().as_str()))]
    pub async fn round(
        &self,
        want: Option<Round>,
        msg: impl ToString,
    ) -> Result<Metrics<V>, WaitError> {
        self.metrics(
            |m| m.round == want,
            &format!("{} .round == {:?}", msg.to_string(), want),
        )
        .await
    }

    /// Wait until at least `n` values are decided or timeout.
    #[tracing::instrument(level = "trace", skip(self), fields(msg=msg.to_string().as_str()))]
    pub async fn decided(
        &self,
        n: u64,
        msg: impl ToString,
    ) -> Result<Metrics<V>, WaitError> {
        self.metrics(
            |m| m.decided >= n,
            &format!("{} .decided >= {}", msg.to_string(), n),
        )
        .await
    }
}
