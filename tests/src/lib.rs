//! Integration tests of paxos-learner live in `tests/`.
