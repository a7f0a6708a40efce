use std::fmt;

use crate::quorum::quorum_set::QuorumSet;

/// A simple majority quorum set over `total` participants.
///
/// The participants are not enumerated: any `total / 2 + 1` distinct ids
/// form a quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Majority {
    total: u64,
}

impl fmt::Display for Majority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.quorum_size(), self.total)
    }
}

impl Majority {
    pub(crate) fn new(total: u64) -> Self {
        Self { total }
    }

    /// The least number of distinct ids that constitute a quorum.
    pub(crate) fn quorum_size(&self) -> u64 {
        self.total / 2 + 1
    }
}

impl<ID> QuorumSet<ID> for Majority
where ID: 'static
{
    fn is_quorum<'a, I: Iterator<Item = &'a ID>>(&self, ids: I) -> bool {
        let mut count = 0;
        let limit = self.total;
        for _id in ids {
            count += 2;
            if count > limit {
                return true;
            }
        }
        false
    }
}
