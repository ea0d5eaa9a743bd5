//! Shortener - short key allocation over an embedded transactional store
//!
//! Maps URLs to 8-letter keys and persists the mapping.
//!
//! # Architecture
//! - `allocator`: URL validation, pluggable key generators, collision-free allocation
//! - `storage`: the mapping store trait and its redb / in-memory backends
//! - `config`: static configuration (TOML + environment)
//! - `system`: logging and store lifecycle
//! - `interfaces`, `cli`: the command-line caller

pub mod allocator;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod storage;
pub mod system;
pub mod utils;
