//! User-facing callers of the core
pub mod cli;
