//! Basic types and utilities shared across the crate.

pub mod display_ext;

/// A trait that combines `Serialize` and `Deserialize`, to bound a value that
/// can be carried in a serializable message.
pub trait Serde: serde::Serialize + for<'a> serde::Deserialize<'a> {}

impl<T> Serde for T where T: serde::Serialize + for<'a> serde::Deserialize<'a> {}
