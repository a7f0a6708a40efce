use std::sync::Arc;

use anyhow::Result;
use paxos_learner::testing::vote;
use paxos_learner::Config;
use pretty_assertions::assert_eq;

use crate::fixtures::assert_no_decision;
use crate::fixtures::new_learner;
use crate::fixtures::new_learner_with;
use crate::fixtures::recv_decided;
use crate::fixtures::ut_harness;
use crate::fixtures::TIMEOUT;

/// Votes delivered concurrently through cloned handles decide exactly once.
///
/// What does this test do?
///
/// - start a learner of 5 participants with a small vote queue.
/// - spawn one task per participant, each delivers its vote for "x".
/// - assert "x" is decided once and the 2 votes after the quorum do not
///   decide it again.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn concurrent_acceptors_decide_once() -> Result<()> {
    let config = Arc::new(
        Config {
            participants: 5,
            vote_queue_capacity: 2,
        }
        .validate()?,
    );
    let (learner, mut rx) = new_learner_with(config, 16)?;

    let mut handles = vec![];
    for from in 1..=5 {
        let l = learner.clone();
        handles.push(tokio::spawn(async move {
            l.deliver_vote(vote(from, 1, "x")).await
        }));
    }

    for h in handles {
        h.await??;
    }

    assert_eq!("x", recv_decided(&mut rx).await?);

    let m = learner.wait(Some(TIMEOUT)).processed(5, "all votes").await?;
    assert_no_decision(&mut rx);
    assert_eq!(1, m.decided);
    assert_eq!(2, m.tallied);

    learner.stop().await?;
    Ok(())
}

/// Learners of different Paxos instances do not interfere.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn learners_are_independent() -> Result<()> {
    let (l1, mut rx1) = new_learner(3)?;
    let (l2, mut rx2) = new_learner(3)?;

    l1.deliver_vote(vote(1, 1, "x")).await?;
    l2.deliver_vote(vote(1, 1, "y")).await?;
    l2.deliver_vote(vote(2, 1, "y")).await?;

    assert_eq!("y", recv_decided(&mut rx2).await?);

    l1.wait(Some(TIMEOUT)).processed(1, "l1 vote").await?;
    assert_no_decision(&mut rx1);

    l1.deliver_vote(vote(2, 1, "x")).await?;
    assert_eq!("x", recv_decided(&mut rx1).await?);

    l1.stop().await?;
    l2.stop().await?;
    Ok(())
}
