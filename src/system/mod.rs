//! System-level modules
//!
//! - Logging initialization
//! - Lifecycle management (startup, shutdown) of the store handle

pub mod lifetime;
pub mod logging;
