use anyhow::Result;
use paxos_learner::testing::vote;
use paxos_learner::Round;
use pretty_assertions::assert_eq;

use crate::fixtures::assert_no_decision;
use crate::fixtures::new_learner;
use crate::fixtures::recv_decided;
use crate::fixtures::ut_harness;
use crate::fixtures::TIMEOUT;

/// A participant delivering the same vote twice is counted once.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn duplicate_vote_is_counted_once() -> Result<()> {
    let (learner, mut rx) = new_learner(3)?;

    learner.deliver_vote(vote(1, 1, "x")).await?;
    learner.deliver_vote(vote(1, 1, "x")).await?;

    let m = learner.wait(Some(TIMEOUT)).processed(2, "duplicate").await?;
    assert_no_decision(&mut rx);
    assert_eq!(1, m.tallied);
    assert_eq!(0, m.decided);

    learner.stop().await?;
    Ok(())
}

/// Once a higher round is seen, votes of a lower round never decide.
///
/// What does this test do?
///
/// - start a learner of 5 participants.
/// - deliver 2 votes of round 1, then 1 vote of round 2.
/// - deliver the rest 3 votes of round 1, which would make a quorum of round 1.
/// - assert nothing is decided and the tallied round stays at round 2.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn lower_round_never_decides_after_higher_round() -> Result<()> {
    let (learner, mut rx) = new_learner(5)?;

    learner.deliver_vote(vote(1, 1, "x")).await?;
    learner.deliver_vote(vote(2, 1, "x")).await?;
    learner.deliver_vote(vote(3, 2, "y")).await?;

    learner.deliver_vote(vote(3, 1, "x")).await?;
    learner.deliver_vote(vote(4, 1, "x")).await?;
    learner.deliver_vote(vote(5, 1, "x")).await?;

    let m = learner.wait(Some(TIMEOUT)).processed(6, "stale votes").await?;
    assert_no_decision(&mut rx);
    assert_eq!(Some(Round(2)), m.round);
    assert_eq!(Some("y".to_string()), m.candidate);
    assert_eq!(1, m.tallied);

    learner.deliver_vote(vote(4, 2, "y")).await?;
    learner.deliver_vote(vote(5, 2, "y")).await?;
    assert_eq!("y", recv_decided(&mut rx).await?);

    learner.stop().await?;
    Ok(())
}

/// A vote for another value in the same round restarts the tally.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn other_value_in_same_round_restarts_tally() -> Result<()> {
    let (learner, mut rx) = new_learner(3)?;

    learner.deliver_vote(vote(1, 1, "x")).await?;
    learner.deliver_vote(vote(2, 1, "y")).await?;

    let m = learner.wait(Some(TIMEOUT)).processed(2, "conflict").await?;
    assert_no_decision(&mut rx);
    assert_eq!(Some(Round(1)), m.round);
    assert_eq!(Some("y".to_string()), m.candidate);
    assert_eq!(1, m.tallied);

    learner.deliver_vote(vote(3, 1, "y")).await?;
    assert_eq!("y", recv_decided(&mut rx).await?);

    learner.stop().await?;
    Ok(())
}
