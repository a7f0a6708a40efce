//! Error types exposed by this crate.

use std::fmt;

use crate::vote::Vote;

/// Fatal is unrecoverable: the learner task is gone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum Fatal {
    #[error("panicked")]
    Panicked,

    /// Learner stopped normally.
    #[error("Stopped normally")]
    Stopped,
}

/// Error returned by [`Learner::try_deliver_vote`], it hands the vote back to
/// the caller.
///
/// [`Learner::try_deliver_vote`]: crate::Learner::try_deliver_vote
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TryDeliverError<V>
where V: fmt::Debug
{
    /// The inbound vote queue is full.
    #[error("vote queue is full, rejected: {0}")]
    Full(Vote<V>),

    /// The learner has stopped.
    #[error("learner stopped, rejected: {0}")]
    Stopped(Vote<V>),
}

impl<V> TryDeliverError<V>
where V: fmt::Debug
{
    /// Take back the vote that was not delivered.
    pub fn into_vote(self) -> Vote<V> {
        match self {
            Self::Full(v) => v,
            Self::Stopped(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("infallible")]
pub enum Infallible {}
