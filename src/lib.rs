//! Enemy fighter power estimator: library entry point.
//!
//! Exposes config, master data, the estimator, diagnostics, air state and
//! report rendering for use by the CLI and tests.

pub mod airstate;
pub mod config;
pub mod diagnostics;
pub mod estimate;
pub mod master;
pub mod report;
pub mod util;
