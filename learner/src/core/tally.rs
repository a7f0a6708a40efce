use std::collections::BTreeMap;

use tracing::debug;
use tracing::info;

use crate::base::display_ext::DebugOption;
use crate::base::display_ext::DisplayOptionExt;
use crate::quorum::Majority;
use crate::quorum::QuorumSet;
use crate::vote::ParticipantId;
use crate::vote::Round;
use crate::vote::Vote;
use crate::Value;

/// Counts the votes of the highest round seen so far and tells when a value
/// is decided.
///
/// Every vote kept in `votes` is for `round` and `candidate`.
pub(crate) struct Tally<V>
where V: Value
{
    quorum: Majority,

    /// The highest round seen, `None` if no vote has been seen.
    round: Option<Round>,

    /// The value being voted for in `round`.
    candidate: Option<V>,

    /// The vote of each participant in `round`. Last write wins.
    votes: BTreeMap<ParticipantId, V>,
}

impl<V> Tally<V>
where V: Value
{
    pub(crate) fn new(participants: u64) -> Self {
        Self {
            quorum: Majority::new(participants),
            round: None,
            candidate: None,
            votes: BTreeMap::new(),
        }
    }

    pub(crate) fn round(&self) -> Option<Round> {
        self.round
    }

    pub(crate) fn candidate(&self) -> Option<&V> {
        self.candidate.as_ref()
    }

    /// Number of participants counted in the current round.
    pub(crate) fn len(&self) -> usize {
        self.votes.len()
    }

    /// Count a vote and return the decided value if the vote completes a
    /// quorum.
    ///
    /// - A vote of a lower round is ignored.
    /// - A vote of a higher round, or of another value in the current round,
    ///   discards all counted votes and starts a new tally for its round and
    ///   value.
    /// - Once a quorum is reached the counted votes are discarded, so that
    ///   the same value is decided again only by a new quorum.
    pub(crate) fn handle_vote(&mut self, vote: Vote<V>) -> Option<V> {
        let rnd = Some(vote.rnd);

        if rnd < self.round {
            debug!(
                "ignore stale {}, current round: {}",
                vote,
                self.round.display()
            );
            return None;
        }

        let value_changed = match &self.candidate {
            Some(c) => c != &vote.val,
            None => false,
        };

        if rnd > self.round || value_changed {
            info!(
                "reset tally: from {}:{} to {}:{:?}, discard {} votes",
                self.round.display(),
                DebugOption(&self.candidate),
                vote.rnd,
                vote.val,
                self.votes.len()
            );

            self.votes.clear();
            self.round = rnd;
            self.candidate = Some(vote.val.clone());
        }

        self.votes.insert(vote.from, vote.val);

        debug!(
            "counted votes of {}: {:?}, quorum: {}",
            self.round.display(),
            self.votes.keys().collect::<Vec<_>>(),
            self.quorum
        );

        if self.quorum.is_quorum(self.votes.keys()) {
            self.votes.clear();
            return self.candidate.clone();
        }

        None
    }
}
