//! Testing utilities for the learner.

use crate::vote::ParticipantId;
use crate::vote::Vote;

/// Builds a vote carrying a `String` value, for testing purposes.
pub fn vote(from: ParticipantId, rnd: u64, val: impl ToString) -> Vote<String> {
    Vote::new(from, rnd, val.to_string())
}
