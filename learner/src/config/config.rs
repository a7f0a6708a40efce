//! Learner runtime configuration.

use anyerror::AnyError;
use clap::Parser;

use crate::config::errors::ConfigError;

/// The runtime configuration for a Learner.
///
/// `participants` is the total number of Paxos participants. A value is
/// decided when more than `participants / 2` of them voted for it in the same
/// round, so it must be the same on every learner of a Paxos instance.
#[derive(Clone, Debug, Parser)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// The total number of Paxos participants
    #[clap(long, default_value = "3")]
    pub participants: u64,

    /// The max number of votes queued before the learner handles them.
    ///
    /// When the queue is full, delivering a vote waits until there is room.
    #[clap(long, default_value = "10")]
    pub vote_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        <Self as Parser>::parse_from(Vec::<&'static str>::new())
    }
}

impl Config {
    /// Build a `Config` with default values except the number of
    /// participants, and validate it.
    pub fn with_participants(participants: u64) -> Result<Config, ConfigError> {
        Config {
            participants,
            ..Default::default()
        }
        .validate()
    }

    /// Build a `Config` instance from a series of command line arguments.
    ///
    /// The first element in `args` must be the application name.
    pub fn build(args: &[&str]) -> Result<Config, ConfigError> {
        let config = <Self as Parser>::try_parse_from(args).map_err(|e| {
            ConfigError::ParseError {
                source: AnyError::from(&e),
                args: args.iter().map(|x| x.to_string()).collect(),
            }
        })?;
        config.validate()
    }

    /// Validate the state of this config.
    pub fn validate(self) -> Result<Config, ConfigError> {
        self.check()?;
        Ok(self)
    }

    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if self.participants == 0 {
            return Err(ConfigError::NoParticipants);
        }

        if self.vote_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }

        Ok(())
    }
}
