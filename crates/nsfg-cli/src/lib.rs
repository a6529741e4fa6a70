//! CLI library components for the NSFG pregnancy-count checker.

pub mod logging;
pub mod pipeline;
pub mod selftest;
pub mod summary;
