#![doc = include_str!("lib_readme.md")]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::bool_comparison)]
#![allow(clippy::type_complexity)]
#![deny(unused_qualifications)]

mod config;
mod core;
mod quorum;

pub mod app;
pub mod base;
pub mod errors;
pub mod learner;
pub mod metrics;
pub mod testing;
pub mod vote;

pub use anyerror;
pub use anyerror::AnyError;

pub use crate::app::Value;
pub use crate::base::Serde;
pub use crate::config::Config;
pub use crate::config::ConfigError;
pub use crate::learner::Learner;
pub use crate::metrics::Metrics;
pub use crate::vote::ParticipantId;
pub use crate::vote::Round;
pub use crate::vote::Vote;
