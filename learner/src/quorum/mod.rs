//! A quorum is a set of participants whose votes are enough to decide a
//! value. The only quorum a single-decree Paxos learner needs is a
//! **majority** of all participants.

mod majority;
mod quorum_set;


pub(crate) use majority::Majority;
pub(crate) use quorum_set::QuorumSet;
