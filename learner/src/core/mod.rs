//! The `LearnerCore` is the single task that owns the learner state.
//!
//! It receives votes from the [`Learner`](crate::Learner) handle, counts them
//! with a [`Tally`](tally::Tally) and sends decided values to the
//! application.

pub(crate) mod core;
pub(crate) mod core_state;
pub(crate) mod tally;
