use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::errors::Fatal;
use crate::errors::Infallible;

/// The running state of LearnerCore
pub(crate) enum CoreState {
    /// The LearnerCore task is still running.
    Running(JoinHandle<Result<Infallible, Fatal>>),

    /// The LearnerCore task is waiting for a signal to finish joining.
    Joining(watch::Receiver<bool>),

    /// The LearnerCore task has finished. The return value of the task is
    /// stored.
    Done(Result<Infallible, Fatal>),
}
