//! Implement [`fmt::Display`] for types such as `Option<T>`.

use std::fmt;

/// Implement `Display` for `Option<T>` if T is `Display`.
///
/// It outputs a literal string `"None"` if it is None. Otherwise it invokes
/// the Display implementation for T.
pub struct DisplayOption<'a, T: fmt::Display>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for DisplayOption<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => {
                write!(f, "None")
            }
            Some(x) => x.fmt(f),
        }
    }
}

pub trait DisplayOptionExt<'a, T: fmt::Display> {
    fn display(&'a self) -> DisplayOption<'a, T>;
}

impl<'a, T> DisplayOptionExt<'a, T> for Option<T>
where T: fmt::Display
{
    fn display(&'a self) -> DisplayOption<'a, T> {
        DisplayOption(self)
    }
}

/// Implement `Display` for `Option<T>` if T is `Debug`.
///
/// Values are opaque to the learner and only required to be `Debug`.
pub struct DebugOption<'a, T: fmt::Debug>(pub &'a Option<T>);

impl<T: fmt::Debug> fmt::Display for DebugOption<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => {
                write!(f, "None")
            }
            Some(x) => write!(f, "{:?}", x),
        }
    }
}
