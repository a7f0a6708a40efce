#![allow(clippy::bool_assert_comparison)]

#[path = "../fixtures/mod.rs"]
mod fixtures;

mod t20_duplicate_and_stale;
mod t30_concurrent_acceptors;
