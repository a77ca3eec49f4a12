//! Integration test suite for resmeta
//!
//! End-to-end runs of the `resmeta` binary against temporary projects.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **extract**: mapping discovery, parameter layering and output formats
//! - **resolve**: single-value placeholder resolution and error reporting

mod extract;
mod resolve;
