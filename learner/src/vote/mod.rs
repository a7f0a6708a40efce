//! The vote notification an acceptor broadcasts to learners.

use std::fmt;

/// The id of a Paxos participant.
pub type ParticipantId = u64;

/// A voting round.
///
/// Rounds are totally ordered and a higher round supersedes every lower one.
/// "No round observed yet" is `Option::<Round>::None`, which is ordered below
/// every round.
#[derive(Debug, Clone, Copy, Default)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(derive_more::From, derive_more::Display)]
#[derive(serde::Deserialize, serde::Serialize)]
#[display("R{_0}")]
pub struct Round(pub u64);

impl Round {
    pub fn new(rnd: u64) -> Self {
        Self(rnd)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Participant `from` voted for `val` in round `rnd`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Vote<V> {
    pub from: ParticipantId,
    pub rnd: Round,
    pub val: V,
}

impl<V> Vote<V> {
    pub fn new(from: ParticipantId, rnd: u64, val: V) -> Self {
        Self {
            from,
            rnd: Round(rnd),
            val,
        }
    }
}

impl<V> fmt::Display for Vote<V>
where V: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vote{{from:{}, rnd:{}, val:{:?}}}",
            self.from, self.rnd, self.val
        )
    }
}
