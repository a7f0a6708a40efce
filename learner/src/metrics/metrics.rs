use std::fmt;

use crate::base::display_ext::DebugOption;
use crate::base::display_ext::DisplayOptionExt;
use crate::errors::Fatal;
use crate::vote::ParticipantId;
use crate::vote::Round;

/// A set of metrics describing the current state of a Learner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Metrics<V> {
    pub running_state: Result<(), Fatal>,

    /// The ID of the learner.
    pub id: ParticipantId,

    /// The highest round seen.
    pub round: Option<Round>,

    /// The value being voted for in `round`.
    pub candidate: Option<V>,

    /// Number of participants counted towards a quorum in `round`.
    pub tallied: u64,

    /// Number of votes handled, including the stale ones.
    pub processed: u64,

    /// Number of values decided so far.
    pub decided: u64,

    /// The value decided most recently.
    pub last_decided: Option<V>,
}

impl<V> fmt::Display for Metrics<V>
where V: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metrics{{")?;

        write!(
            f,
            "id:{}, round:{}, candidate:{}, tallied:{}, processed:{}, decided:{}, last_decided:{}",
            self.id,
            self.round.display(),
            DebugOption(&self.candidate),
            self.tallied,
            self.processed,
            self.decided,
            DebugOption(&self.last_decided),
        )?;

        write!(f, "}}")?;
        Ok(())
    }
}

impl<V> Metrics<V> {
    pub fn new_initial(id: ParticipantId) -> Self {
        Self {
            running_state: Ok(()),
            id,
            round: None,
            candidate: None,
            tallied: 0,
            processed: 0,
            decided: 0,
            last_decided: None,
        }
    }
}
