use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use paxos_learner::Config;
use paxos_learner::errors::Fatal;
use paxos_learner::errors::TryDeliverError;
use paxos_learner::testing::vote;
use pretty_assertions::assert_eq;

use crate::fixtures::new_learner;
use crate::fixtures::new_learner_with;
use crate::fixtures::recv_decided;
use crate::fixtures::ut_harness;
use crate::fixtures::TIMEOUT;

/// Stop a learner and deliver votes to it.
///
/// What does this test do?
///
/// - start a learner, decide a value, stop it.
/// - assert stopping again succeeds.
/// - assert delivering a vote to a stopped learner returns an error.
/// - assert the metrics record the stop.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn stop_learner() -> Result<()> {
    let (learner, mut rx) = new_learner(3)?;

    learner.deliver_vote(vote(1, 1, "x")).await?;
    learner.deliver_vote(vote(2, 1, "x")).await?;
    assert_eq!("x", recv_decided(&mut rx).await?);

    learner.stop().await?;

    tracing::info!("--- stop again");
    {
        learner.stop().await?;
    }

    tracing::info!("--- deliver to a stopped learner");
    {
        let res = learner.deliver_vote(vote(3, 1, "x")).await;
        assert_eq!(Err(Fatal::Stopped), res);

        let res = learner.clone().deliver_vote(vote(3, 1, "x")).await;
        assert_eq!(Err(Fatal::Stopped), res);

        let res = learner.try_deliver_vote(vote(3, 1, "x"));
        assert_eq!(Err(TryDeliverError::Stopped(vote(3, 1, "x"))), res);
    }

    tracing::info!("--- metrics record the stop");
    {
        let m = learner.metrics().borrow().clone();
        assert_eq!(Err(Fatal::Stopped), m.running_state);
        assert_eq!(2, m.processed);
        assert_eq!(1, m.decided);
        assert_eq!(Some("x".to_string()), m.last_decided);
    }

    tracing::info!("--- decided-value channel is closed");
    {
        let got = tokio::time::timeout(TIMEOUT, rx.recv()).await?;
        assert_eq!(None, got);
    }

    Ok(())
}

/// Concurrent stop calls all return once the learner quits.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn concurrent_stop() -> Result<()> {
    let (learner, _rx) = new_learner(3)?;

    let l1 = learner.clone();
    let l2 = learner.clone();

    let (r1, r2) = futures::join!(l1.stop(), l2.stop());
    r1?;
    r2?;

    learner.stop().await?;
    Ok(())
}

/// A `stop()` that is cancelled while the learner is blocked sending a decided
/// value does not break later `stop()` calls.
///
/// What does this test do?
///
/// - start a learner with a decided-value channel of capacity 1.
/// - decide "a" and "b" without receiving, so the learner blocks on sending
///   "b".
/// - call `stop()` with a timeout, it times out and is dropped.
/// - drain the decided values and assert `stop()` returns `Ok`.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn stop_again_after_cancelled_stop() -> Result<()> {
    let config = Arc::new(
        Config {
            participants: 1,
            vote_queue_capacity: 1,
        }
        .validate()?,
    );
    let (learner, mut rx) = new_learner_with(config, 1)?;

    tracing::info!("--- block the learner on sending a decided value");
    {
        learner.deliver_vote(vote(1, 1, "a")).await?;
        learner.deliver_vote(vote(1, 2, "b")).await?;

        // Returns once "b" is taken out of the queue: the learner is then
        // sending "b" to the full decided-value channel.
        learner.deliver_vote(vote(1, 3, "c")).await?;
    }

    tracing::info!("--- stop with a timeout, it is cancelled");
    {
        let res =
            tokio::time::timeout(Duration::from_millis(100), learner.stop())
                .await;
        assert!(res.is_err(), "stop() is blocked and times out");
    }

    tracing::info!("--- drain decided values and stop again");
    {
        assert_eq!("a", recv_decided(&mut rx).await?);
        assert_eq!("b", recv_decided(&mut rx).await?);

        tokio::time::timeout(TIMEOUT, learner.stop()).await??;
        learner.stop().await?;

        let res = learner.deliver_vote(vote(1, 4, "d")).await;
        assert_eq!(Err(Fatal::Stopped), res);
    }

    tracing::info!("--- metrics record the stop");
    {
        let m = learner.metrics().borrow().clone();
        assert_eq!(Err(Fatal::Stopped), m.running_state);
        assert_eq!(2, m.decided);
    }

    Ok(())
}
