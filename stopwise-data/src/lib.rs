//! Service adapters for the Stopwise engine.
//!
//! Responsibilities:
//! - Implement the provider traits from `stopwise-core` against external
//!   routing and geocoding services.
//! - Encapsulate wire formats and map service failures onto
//!   [`stopwise_core::ProviderError`].
//!
//! Boundaries:
//! - Do not encode domain rules (live in `stopwise-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
