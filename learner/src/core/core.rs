use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing::Instrument;
use tracing::Level;
use tracing::Span;

use crate::base::display_ext::DisplayOptionExt;
use crate::core::tally::Tally;
use crate::errors::Fatal;
use crate::errors::Infallible;
use crate::metrics::Metrics;
use crate::vote::ParticipantId;
use crate::vote::Vote;
use crate::Value;

/// The task that counts votes and emits decided values.
///
/// All of the learner state is owned by this task, votes are handled one at a
/// time in the order they are queued.
pub(crate) struct LearnerCore<V>
where V: Value
{
    /// This learner's ID.
    pub(crate) id: ParticipantId,

    pub(crate) tally: Tally<V>,

    /// Number of votes handled.
    pub(crate) processed: u64,

    /// Number of values decided.
    pub(crate) decided: u64,

    pub(crate) last_decided: Option<V>,

    pub(crate) rx_vote: mpsc::Receiver<Vote<V>>,

    /// Receives the signal to stop, or an error if every handle is dropped.
    pub(crate) rx_shutdown: oneshot::Receiver<()>,

    /// Decided values are sent to the application through this channel.
    pub(crate) tx_decided: mpsc::Sender<V>,

    pub(crate) tx_metrics: watch::Sender<Metrics<V>>,

    pub(crate) span: Span,
}

impl<V> LearnerCore<V>
where V: Value
{
    /// The main loop of the learner.
    pub(crate) async fn main(mut self) -> Result<Infallible, Fatal> {
        debug!("Learner started");

        self.report_metrics(Ok(()));

        let span = tracing::span!(parent: &self.span, Level::DEBUG, "main");
        let res = self.runtime_loop().instrument(span).await;

        let err = match res {
            Ok(infallible) => match infallible {},
            Err(err) => err,
        };
        match err {
            Fatal::Stopped => { /* Normal quit */ }
            _ => {
                error!(error = display(&err), "quit LearnerCore::main on error");
            }
        }

        debug!("update the metrics for shutdown");
        self.report_metrics(Err(err.clone()));

        info!("LearnerCore shutdown complete");

        Err(err)
    }

    /// Run an event handling loop
    ///
    /// It always returns a [`Fatal`] error upon returning.
    #[tracing::instrument(level = "debug", skip_all, fields(id=display(&self.id)))]
    async fn runtime_loop(&mut self) -> Result<Infallible, Fatal> {
        loop {
            debug!("id={} runtime_loop: wait for next vote", self.id);

            futures::select_biased! {
                _ = (&mut self.rx_shutdown).fuse() => {
                    info!("id={} received shutdown signal", self.id);
                    return Err(Fatal::Stopped);
                }

                vote_res = self.rx_vote.recv().fuse() => {
                    match vote_res {
                        Some(vote) => self.handle_vote(vote).await,
                        None => {
                            info!("all rx_vote senders are dropped");
                            return Err(Fatal::Stopped);
                        }
                    };
                }
            }

            self.report_metrics(Ok(()));
        }
    }

    /// Count a vote and send the value to the application if it is decided.
    #[tracing::instrument(level = "debug", skip_all, fields(vote=%vote))]
    async fn handle_vote(&mut self, vote: Vote<V>) {
        self.processed += 1;

        let Some(value) = self.tally.handle_vote(vote) else {
            return;
        };

        self.decided += 1;
        self.last_decided = Some(value.clone());

        info!(
            "id={} decided: {:?} in round {}",
            self.id,
            value,
            self.tally.round().display()
        );

        let res = self.tx_decided.send(value).await;
        if let Err(err) = res {
            warn!(
                "id={} decided-value receiver is dropped, discard: {:?}",
                self.id, err.0
            );
        }
    }

    /// Report a metrics payload on the current state of the learner.
    pub(crate) fn report_metrics(&self, running_state: Result<(), Fatal>) {
        let m = Metrics {
            running_state,
            id: self.id,
            round: self.tally.round(),
            candidate: self.tally.candidate().cloned(),
            tallied: self.tally.len() as u64,
            processed: self.processed,
            decided: self.decided,
            last_decided: self.last_decided.clone(),
        };

        debug!("id={} report_metrics: {}", self.id, m);
        self.tx_metrics.send_replace(m);
    }
}
