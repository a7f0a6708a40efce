use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tokio::task::JoinError;
use tokio::task::JoinHandle;

use crate::core::core_state::CoreState;
use crate::errors::Fatal;
use crate::errors::Infallible;
use crate::vote::ParticipantId;
use crate::vote::Vote;
use crate::Config;
use crate::Metrics;
use crate::Value;

/// LearnerInner is the internal handle and provides internally used APIs to
/// communicate with `LearnerCore`.
pub(in crate::learner) struct LearnerInner<V>
where V: Value
{
    pub(in crate::learner) id: ParticipantId,
    pub(in crate::learner) config: Arc<Config>,
    pub(in crate::learner) tx_vote: mpsc::Sender<Vote<V>>,

    /// Taken when the stop signal is sent.
    pub(in crate::learner) tx_shutdown: Mutex<Option<oneshot::Sender<()>>>,
    pub(in crate::learner) rx_metrics: watch::Receiver<Metrics<V>>,
    pub(in crate::learner) core_state: Mutex<CoreState>,
}

impl<V> LearnerInner<V>
where V: Value
{
    /// Queue a vote for `LearnerCore`, wait for room if the queue is full.
    pub(in crate::learner) async fn send_vote(
        &self,
        vote: Vote<V>,
    ) -> Result<(), Fatal> {
        let send_res = self.tx_vote.send(vote).await;

        if let Err(e) = send_res {
            let fatal = self
                .get_core_stopped_error(
                    "sending Vote to LearnerCore",
                    Some(e.0.to_string()),
                )
                .await;
            return Err(fatal);
        }
        Ok(())
    }

    /// Send the stop signal to `LearnerCore`.
    ///
    /// Returns `false` if the signal has been sent before.
    pub(in crate::learner) fn send_shutdown(&self) -> bool {
        let tx = {
            let mut tx_shutdown = self.tx_shutdown.lock().unwrap();
            tx_shutdown.take()
        };

        let Some(tx) = tx else {
            return false;
        };

        // LearnerCore may have quit already, the error is ignored.
        let _ = tx.send(());
        true
    }

    /// Get the error that caused LearnerCore to stop.
    pub(in crate::learner) async fn get_core_stopped_error(
        &self,
        when: impl fmt::Display,
        message_summary: Option<impl fmt::Display + Default>,
    ) -> Fatal {
        let core_res = self.core_result().await;

        tracing::error!(
            core_result = debug(&core_res),
            "failure {}; message: {}",
            when,
            message_summary.unwrap_or_default()
        );

        match core_res {
            Ok(infallible) => match infallible {},
            Err(fatal) => fatal,
        }
    }

    /// Wait for `LearnerCore` to quit and return the value it returned.
    pub(in crate::learner) async fn core_result(
        &self,
    ) -> Result<Infallible, Fatal> {
        // Wait for the core task to finish.
        self.join_core_task().await;

        let state = self.core_state.lock().unwrap();
        if let CoreState::Done(core_task_res) = &*state {
            core_task_res.clone()
        } else {
            unreachable!("LearnerCore should have already quit")
        }
    }

    /// Wait for `LearnerCore` task to finish and record the returned value
    /// from the task.
    ///
    /// It is cancel-safe: if the caller that is joining the task is dropped,
    /// the task goes back to `Running` and the next caller joins it.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(in crate::learner) async fn join_core_task(&self) {
        loop {
            // Get the Running state of LearnerCore,
            // or an error if LearnerCore has been in Joining state.
            let running_res = {
                let mut state = self.core_state.lock().unwrap();

                match &*state {
                    CoreState::Running(_) => {
                        let (tx, rx) = watch::channel::<bool>(false);

                        let prev = std::mem::replace(
                            &mut *state,
                            CoreState::Joining(rx),
                        );

                        let CoreState::Running(join_handle) = prev else {
                            unreachable!()
                        };

                        Ok((join_handle, tx))
                    }
                    CoreState::Joining(watch_rx) => Err(watch_rx.clone()),
                    CoreState::Done(_) => {
                        // LearnerCore has already finished exiting, nothing to do
                        return;
                    }
                }
            };

            match running_res {
                Ok((join_handle, tx)) => {
                    let mut joining = Joining {
                        core_state: &self.core_state,
                        join_handle: Some(join_handle),
                    };

                    let Some(join_res) = joining.join().await else {
                        continue;
                    };

                    tracing::info!(res = debug(&join_res), "LearnerCore exited");

                    let core_task_res = match join_res {
                        Err(err) => {
                            if err.is_panic() {
                                Err(Fatal::Panicked)
                            } else {
                                Err(Fatal::Stopped)
                            }
                        }
                        Ok(returned_res) => returned_res,
                    };

                    {
                        let mut state = self.core_state.lock().unwrap();
                        *state = CoreState::Done(core_task_res);
                    }
                    tx.send(true).ok();
                    return;
                }
                Err(mut rx) => {
                    // Other task is waiting for the core to finish.
                    // The sender is dropped without a `true` if that task is
                    // cancelled, then check the state again.
                    loop {
                        if *rx.borrow() {
                            break;
                        }
                        let res = rx.changed().await;
                        if res.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// Owns the `JoinHandle` while a caller is joining `LearnerCore`.
///
/// If it is dropped before the task is joined, the handle is put back as
/// `CoreState::Running`.
struct Joining<'a> {
    core_state: &'a Mutex<CoreState>,
    join_handle: Option<JoinHandle<Result<Infallible, Fatal>>>,
}

impl Joining<'_> {
    /// Wait for the task to quit.
    ///
    /// Returns `None` if it has been joined.
    async fn join(
        &mut self,
    ) -> Option<Result<Result<Infallible, Fatal>, JoinError>> {
        let join_handle = self.join_handle.as_mut()?;
        let res = join_handle.await;
        self.join_handle = None;
        Some(res)
    }
}

impl Drop for Joining<'_> {
    fn drop(&mut self) {
        if let Some(join_handle) = self.join_handle.take() {
            tracing::info!("joining LearnerCore is cancelled, back to Running");

            let mut state = self.core_state.lock().unwrap();
            *state = CoreState::Running(join_handle);
        }
    }
}
