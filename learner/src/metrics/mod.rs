//! Learner metrics for observability.
//!
//! Metrics are observed on a running learner via the
//! [`Learner::metrics() -> watch::Receiver<Metrics>`](`crate::Learner::metrics`)
//! method. [`Metrics`] contains the round and the candidate value being
//! tallied, and how many values have been decided.
//!
//! Metrics is not a stream thus it only guarantees to provide the latest state
//! but not every change of the state.
//! Because internally, `watch::channel()` only stores one last state.

mod metrics;
mod wait;


pub use metrics::Metrics;
pub use wait::Wait;
pub use wait::WaitError;
