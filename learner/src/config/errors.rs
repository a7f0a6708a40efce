use anyerror::AnyError;

/// Error variants related to configuration.
#[derive(Debug, thiserror::Error)]
#[derive(PartialEq, Eq)]
pub enum ConfigError {
    #[error("ParseError: {source} while parsing ({args:?})")]
    ParseError { source: AnyError, args: Vec<String> },

    /// A Paxos instance has at least one participant.
    #[error("participants must be >= 1")]
    NoParticipants,

    #[error("vote_queue_capacity must be >= 1")]
    ZeroQueueCapacity,
}
