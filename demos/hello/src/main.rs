mod logging;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use paxos_learner::Config;
use paxos_learner::Learner;
use paxos_learner::ParticipantId;
use paxos_learner::Vote;
use tokio::sync::mpsc;

use crate::logging::init_logging;

/// Run a learner against simulated acceptors.
#[derive(Debug, Parser)]
struct Args {
    #[clap(flatten)]
    config: Config,

    /// The dir to write log files to.
    #[clap(long, default_value = "_log")]
    log_dir: String,

    /// The log level, `RUST_LOG` overrides it if present.
    #[clap(long, default_value = "DEBUG")]
    log_level: String,
}

/// An acceptor broadcasts its votes of every round to the learner.
async fn run_acceptor(
    learner: Learner<String>,
    id: ParticipantId,
    votes: Vec<(u64, &'static str)>,
) -> anyhow::Result<()> {
    for (rnd, val) in votes {
        learner.deliver_vote(Vote::new(id, rnd, val.to_string())).await?;
        tokio::time::sleep(Duration::from_millis(10 * id)).await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let g = init_logging("learner", &args.log_dir, &args.log_level);
    Box::leak(Box::new(g));

    let config = Arc::new(args.config.validate()?);
    let participants = config.participants;

    let (tx, mut rx) = mpsc::channel(16);
    let learner = Learner::new(1, config, tx)?;

    // Print every decided value.
    let printer = tokio::spawn(async move {
        while let Some(value) = rx.recv().await {
            println!("decided: {:?}", value);
        }
        println!("decided-value channel closed");
    });

    // Only acceptor 1 votes in round 1 before the proposer of round 2 takes
    // over, every acceptor votes in round 2.
    let mut acceptors = vec![];
    for id in 1..=participants {
        let votes = if id == 1 {
            vec![(1, "x"), (2, "y")]
        } else {
            vec![(2, "y")]
        };

        acceptors.push(tokio::spawn(run_acceptor(learner.clone(), id, votes)));
    }

    for a in acceptors {
        a.await??;
    }

    let m = learner
        .wait(Some(Duration::from_millis(1_000)))
        .decided(1, "wait for a decision")
        .await?;
    println!("metrics: {}", m);

    learner.stop().await?;
    printer.await?;

    Ok(())
}
