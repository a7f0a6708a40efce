use std::fmt;

use crate::Serde;

/// A trait defining the payload a Paxos instance agrees upon.
///
/// The learner never inspects a value, it only compares two values for
/// equality, so applications can present their data models as-is.
///
/// There is no distinguished "zero value": the absence of a value is
/// expressed as `Option::None` wherever the learner may not have one, thus a
/// value delivered on the decided-value channel is always a real value.
///
/// ## Note
///
/// The trait is automatically implemented for all types which satisfy its
/// super traits.
pub trait Value:
    fmt::Debug + Clone + PartialEq + Send + Sync + 'static + Serde
{
}

impl<T> Value for T where T: fmt::Debug + Clone + PartialEq + Send + Sync + 'static + Serde
{}
