//! Test modules for the gantry-middleware crate
//!
//! End-to-end suites covering the full pipeline: authentication, context
//! injection, and dispatch.
