#![allow(clippy::bool_assert_comparison)]

#[path = "../fixtures/mod.rs"]
mod fixtures;
