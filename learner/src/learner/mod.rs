//! Public interface of a learner.
//!
//! [`Learner`] serves as the primary interface to a learner, all interactions
//! with the underlying `LearnerCore` task go through it.
//!
//! [`Learner`] instances are cheaply cloneable, so that every acceptor
//! connection of an application can deliver votes to the same learner.

mod inner;

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tracing::info;
use tracing::trace_span;
use tracing::Instrument;
use tracing::Level;

use crate::config::Config;
use crate::config::ConfigError;
use crate::core::core::LearnerCore;
use crate::core::core_state::CoreState;
use crate::core::tally::Tally;
use crate::errors::Fatal;
use crate::errors::TryDeliverError;
use crate::learner::inner::LearnerInner;
use crate::metrics::Metrics;
use crate::metrics::Wait;
use crate::vote::ParticipantId;
use crate::vote::Vote;
use crate::Value;

/// The learner of a single-decree Paxos instance.
///
/// It receives the votes acceptors broadcast and sends a value to the
/// decided-value channel each time a strict majority of the participants
/// voted for it in the same round.
///
/// ### Clone
///
/// This type implements `Clone`, and cloning itself is very cheap and helps to
/// facilitate use with async workflows.
///
/// ### Shutting down
///
/// If any of the interfaces returns a [`Fatal`], this indicates that the
/// learner has stopped. Call [`Learner::stop`] to stop it. It also stops when
/// every handle is dropped.
#[derive(Clone)]
pub struct Learner<V>
where V: Value
{
    inner: Arc<LearnerInner<V>>,
}

impl<V> Learner<V>
where V: Value
{
    /// Create a learner and spawn its task.
    ///
    /// It must be called in the context of a tokio runtime.
    ///
    /// ### `id`
    /// The ID of the participant this learner runs on. It is used only to
    /// identify the learner in logs and metrics.
    ///
    /// ### `config`
    /// The learner config. See the docs on the `Config` object for more
    /// details.
    ///
    /// ### `tx_decided`
    /// Decided values are sent to this channel. The application has to keep
    /// receiving from it: the learner stalls while the channel is full.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(
        id: ParticipantId,
        config: Arc<Config>,
        tx_decided: mpsc::Sender<V>,
    ) -> Result<Self, ConfigError> {
        config.check()?;

        let (tx_vote, rx_vote) = mpsc::channel(config.vote_queue_capacity);
        let (tx_shutdown, rx_shutdown) = oneshot::channel();
        let (tx_metrics, rx_metrics) =
            watch::channel(Metrics::new_initial(id));

        let core_span = tracing::span!(
            parent: tracing::Span::current(),
            Level::DEBUG,
            "Learner",
            id = display(&id),
        );

        let core = LearnerCore {
            id,
            tally: Tally::new(config.participants),

            processed: 0,
            decided: 0,
            last_decided: None,

            rx_vote,
            rx_shutdown,
            tx_decided,
            tx_metrics,

            span: core_span,
        };

        let core_handle = tokio::spawn(
            core.main().instrument(trace_span!("spawn").or_current()),
        );

        info!(
            "id={} Learner spawned, participants: {}, vote queue capacity: {}",
            id, config.participants, config.vote_queue_capacity
        );

        let inner = LearnerInner {
            id,
            config,
            tx_vote,
            tx_shutdown: Mutex::new(Some(tx_shutdown)),
            rx_metrics,
            core_state: Mutex::new(CoreState::Running(core_handle)),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Return the ID of this learner.
    pub fn id(&self) -> ParticipantId {
        self.inner.id
    }

    /// Return the config of this learner.
    pub fn config(&self) -> &Arc<Config> {
        &self.inner.config
    }

    /// Deliver a vote to this learner.
    ///
    /// Votes are handled in the order they are delivered. If the vote queue
    /// is full, it waits until there is room.
    ///
    /// Returns error when the learner has stopped. A vote delivered while
    /// the learner is stopping may be dropped without an error.
    pub async fn deliver_vote(&self, vote: Vote<V>) -> Result<(), Fatal> {
        tracing::debug!(vote = display(&vote), "deliver_vote()");

        self.inner.send_vote(vote).await
    }

    /// Deliver a vote to this learner without waiting.
    ///
    /// The vote is handed back in the error if the queue is full or the
    /// learner has stopped.
    pub fn try_deliver_vote(
        &self,
        vote: Vote<V>,
    ) -> Result<(), TryDeliverError<V>> {
        tracing::debug!(vote = display(&vote), "try_deliver_vote()");

        self.inner.tx_vote.try_send(vote).map_err(|e| match e {
            TrySendError::Full(v) => TryDeliverError::Full(v),
            TrySendError::Closed(v) => TryDeliverError::Stopped(v),
        })
    }

    /// Stop the learner and wait for its task to quit.
    ///
    /// Votes that are still queued are dropped. It returns `Ok(())` if the
    /// learner stopped normally, and can be called more than once.
    #[tracing::instrument(level = "debug", skip_all, fields(id=display(&self.inner.id)))]
    pub async fn stop(&self) -> Result<(), Fatal> {
        if self.inner.send_shutdown() {
            info!("id={} sent shutdown signal to LearnerCore", self.inner.id);
        }

        let core_res = self.inner.core_result().await;

        match core_res {
            Ok(infallible) => match infallible {},
            Err(Fatal::Stopped) => Ok(()),
            Err(fatal) => Err(fatal),
        }
    }

    /// Get a handle to the metrics channel.
    pub fn metrics(&self) -> watch::Receiver<Metrics<V>> {
        self.inner.rx_metrics.clone()
    }

    /// Get a handle to wait for the metrics to satisfy some condition.
    ///
    /// If `timeout` is `None`, then it will wait forever(10 years).
    /// If `timeout` is `Some`, then it will wait for the specified duration.
    ///
    /// ```ignore
    /// # use std::time::Duration;
    ///
    /// let timeout = Duration::from_millis(200);
    ///
    /// // wait for 3 votes to be handled:
    /// learner.wait(Some(timeout)).processed(3, "3 votes").await?;
    ///
    /// // wait for ever for a value to be decided:
    /// learner.wait(None).decided(1, "decided").await?;
    /// ```
    pub fn wait(&self, timeout: Option<Duration>) -> Wait<V> {
        let timeout = match timeout {
            Some(t) => t,
            None => Duration::from_secs(86400 * 365 * 10),
        };
        Wait {
            timeout,
            rx: self.inner.rx_metrics.clone(),
        }
    }
}
