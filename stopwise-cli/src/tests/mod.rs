//! Shared test harness modules for the Stopwise CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod snap_steps;
mod snap_unit;
