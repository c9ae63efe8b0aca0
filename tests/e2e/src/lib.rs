//! # e2e-tests
//!
//! End-to-end scenarios for the testbed harness, run against a real
//! cluster described by `TESTBED_*` environment variables.
//!
//! Every live scenario is `#[ignore = "requires cluster"]`; the pool
//! manager and config parsing keep regular unit coverage.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pool;

pub mod scenarios;
